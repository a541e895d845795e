//! Windows sources:
//! - live tier: CallNtPowerInformation(ProcessorInformation), `CurrentMhz` per logical CPU
//! - descriptor tier: `HKLM\HARDWARE\DESCRIPTION\System\CentralProcessor\N` `~MHz`
//! - process list: Toolhelp32 process snapshot (carries the exe name)
//! - names: QueryFullProcessImageNameW for snapshot entries without an exe name

use std::ffi::c_void;
use std::mem;
use std::path::Path;

use anyhow::{bail, Context, Result};

use windows::core::{PCWSTR, PWSTR};
use windows::Win32::Foundation::{CloseHandle, ERROR_SUCCESS, HANDLE, MAX_PATH};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};
use windows::Win32::System::Power::{CallNtPowerInformation, ProcessorInformation};
use windows::Win32::System::Registry::{RegGetValueW, HKEY_LOCAL_MACHINE, RRF_RT_REG_DWORD};
use windows::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};
use windows::Win32::System::Threading::{
    OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_WIN32,
    PROCESS_QUERY_LIMITED_INFORMATION,
};

use crate::system::{
    CoreReading, ListedProcess, PrimaryFrequencySource, ProcessListSource, ProcessNameSource,
    SecondaryFrequencySource,
};

/// Closes the wrapped handle when dropped, on every return path.
struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// PROCESSOR_POWER_INFORMATION (ntpoapi.h); not exposed by the windows crate.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
struct ProcessorPowerInformation {
    number: u32,
    max_mhz: u32,
    current_mhz: u32,
    mhz_limit: u32,
    max_idle_state: u32,
    current_idle_state: u32,
}

fn logical_processor_count() -> usize {
    unsafe {
        let mut info: SYSTEM_INFO = mem::zeroed();
        GetSystemInfo(&mut info);
        info.dwNumberOfProcessors as usize
    }
}

/// Power-manager processor information
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerInformation;

impl PrimaryFrequencySource for PowerInformation {
    fn read_cores(&self) -> Result<Vec<CoreReading>> {
        let count = logical_processor_count();
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut buffer = vec![ProcessorPowerInformation::default(); count];
        let size = (count * mem::size_of::<ProcessorPowerInformation>()) as u32;
        let status = unsafe {
            CallNtPowerInformation(
                ProcessorInformation,
                None,
                0,
                Some(buffer.as_mut_ptr() as *mut c_void),
                size,
            )
        };
        if !status.is_ok() {
            bail!("CallNtPowerInformation failed: NTSTATUS {:#x}", status.0);
        }

        Ok(buffer
            .iter()
            .enumerate()
            .map(|(core, info)| CoreReading::new(core, Some(info.current_mhz as f64)))
            .collect())
    }
}

/// Per-processor registry keys written at boot
#[derive(Debug, Clone, Copy, Default)]
pub struct CentralProcessorRegistry;

impl CentralProcessorRegistry {
    fn read_mhz(core: usize) -> Option<u32> {
        let subkey = to_wide(&format!(
            "HARDWARE\\DESCRIPTION\\System\\CentralProcessor\\{}",
            core
        ));
        let value = to_wide("~MHz");
        let mut data: u32 = 0;
        let mut len = mem::size_of::<u32>() as u32;

        let status = unsafe {
            RegGetValueW(
                HKEY_LOCAL_MACHINE,
                PCWSTR(subkey.as_ptr()),
                PCWSTR(value.as_ptr()),
                RRF_RT_REG_DWORD,
                None,
                Some(&mut data as *mut u32 as *mut c_void),
                Some(&mut len as *mut u32),
            )
        };
        (status == ERROR_SUCCESS).then_some(data)
    }
}

impl SecondaryFrequencySource for CentralProcessorRegistry {
    fn read_descriptor(&self) -> Result<Vec<CoreReading>> {
        Ok((0..logical_processor_count())
            .filter_map(|core| {
                Self::read_mhz(core).map(|mhz| CoreReading::new(core, Some(mhz as f64)))
            })
            .collect())
    }
}

/// Toolhelp32 process snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolhelpSnapshot;

impl ProcessListSource for ToolhelpSnapshot {
    fn list_processes(&self) -> Result<Vec<ListedProcess>> {
        let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }
            .context("CreateToolhelp32Snapshot failed")?;
        let snapshot = OwnedHandle(snapshot);

        let mut out = Vec::new();
        unsafe {
            let mut entry: PROCESSENTRY32W = mem::zeroed();
            entry.dwSize = mem::size_of::<PROCESSENTRY32W>() as u32;

            if Process32FirstW(snapshot.0, &mut entry).is_err() {
                return Ok(out);
            }
            loop {
                let name = from_wide_nul(&entry.szExeFile);
                out.push(ListedProcess {
                    pid: entry.th32ProcessID,
                    name: (!name.is_empty()).then_some(name),
                });

                if Process32NextW(snapshot.0, &mut entry).is_err() {
                    break;
                }
            }
        }
        Ok(out)
    }
}

/// Image file name of a running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageNameLookup;

impl ProcessNameSource for ImageNameLookup {
    fn primary_name(&self, pid: u32) -> Result<Option<String>> {
        let handle = unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) }
            .with_context(|| format!("OpenProcess({}) failed", pid))?;
        let handle = OwnedHandle(handle);

        let mut buf = vec![0u16; MAX_PATH as usize];
        let mut len = buf.len() as u32;
        unsafe {
            QueryFullProcessImageNameW(
                handle.0,
                PROCESS_NAME_WIN32,
                PWSTR(buf.as_mut_ptr()),
                &mut len,
            )
        }
        .with_context(|| format!("QueryFullProcessImageNameW({}) failed", pid))?;

        let path = String::from_utf16_lossy(&buf[..len as usize]);
        Ok(Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()))
    }

    fn status_name(&self, _pid: u32) -> Result<Option<String>> {
        Ok(None)
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn from_wide_nul(buf: &[u16]) -> String {
    let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_string_helpers() {
        let w = to_wide("cmd.exe");
        assert_eq!(w.last(), Some(&0));
        assert_eq!(from_wide_nul(&w), "cmd.exe");
        assert_eq!(from_wide_nul(&[0x61, 0x62]), "ab");
    }

    #[test]
    fn test_snapshot_lists_current_process() {
        let me = std::process::id();
        let listed = ToolhelpSnapshot.list_processes().unwrap();
        assert!(listed.iter().any(|p| p.pid == me && p.name.is_some()));
    }
}
