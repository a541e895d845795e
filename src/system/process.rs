use tracing::{debug, trace};

use crate::system::{ListedProcess, ProcessListSource, ProcessNameSource};

/// A live process as shown in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    /// Trimmed, never empty
    pub name: String,
}

/// Processes sorted by ascending pid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessSnapshot {
    records: Vec<ProcessRecord>,
}

impl ProcessSnapshot {
    /// Sorts `records` by pid. Callers must already have dropped unnamed entries.
    pub fn from_records(mut records: Vec<ProcessRecord>) -> Self {
        records.sort_by_key(|r| r.pid);
        Self { records }
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessRecord> {
        self.records.iter()
    }
}

/// Trim whitespace and line terminators; `None` if nothing is left.
pub fn clean_name(raw: &str) -> Option<String> {
    let t = raw.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Lists processes and resolves each one's display name.
///
/// Name resolution order: name carried by the listing, then the primary name
/// source, then the status source. A lookup error (typically the process
/// exited after being listed) counts as "no name" and the process is skipped.
pub struct ProcessEnumerator<L, N> {
    list: L,
    names: N,
}

impl<L, N> ProcessEnumerator<L, N>
where
    L: ProcessListSource,
    N: ProcessNameSource,
{
    pub fn new(list: L, names: N) -> Self {
        Self { list, names }
    }

    /// Take one snapshot. Never fails; total failure is an empty snapshot.
    pub fn enumerate(&self) -> ProcessSnapshot {
        let listed = match self.list.list_processes() {
            Ok(l) => l,
            Err(e) => {
                debug!("process listing unavailable: {:#}", e);
                return ProcessSnapshot::default();
            }
        };

        let records: Vec<ProcessRecord> = listed
            .into_iter()
            .filter(|p| p.pid > 0)
            .filter_map(|p| {
                let pid = p.pid;
                match self.resolve_name(p) {
                    Some(name) => Some(ProcessRecord { pid, name }),
                    None => {
                        trace!(pid, "skipping process without a resolvable name");
                        None
                    }
                }
            })
            .collect();

        ProcessSnapshot::from_records(records)
    }

    fn resolve_name(&self, listed: ListedProcess) -> Option<String> {
        if let Some(name) = listed.name.as_deref().and_then(clean_name) {
            return Some(name);
        }

        let pid = listed.pid;
        let primary = self.names.primary_name(pid).ok().flatten();
        if let Some(name) = primary.as_deref().and_then(clean_name) {
            return Some(name);
        }

        let status = self.names.status_name(pid).ok().flatten();
        status.as_deref().and_then(clean_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{bail, Result};
    use std::collections::HashMap;

    struct FakeProcs {
        listing: Option<Vec<ListedProcess>>,
        comm: HashMap<u32, &'static str>,
        status: HashMap<u32, &'static str>,
    }

    impl FakeProcs {
        fn with_pids(pids: &[u32]) -> Self {
            Self {
                listing: Some(pids.iter().map(|&pid| ListedProcess { pid, name: None }).collect()),
                comm: HashMap::new(),
                status: HashMap::new(),
            }
        }
    }

    impl ProcessListSource for FakeProcs {
        fn list_processes(&self) -> Result<Vec<ListedProcess>> {
            match &self.listing {
                Some(l) => Ok(l.clone()),
                None => bail!("listing failed"),
            }
        }
    }

    impl ProcessNameSource for FakeProcs {
        fn primary_name(&self, pid: u32) -> Result<Option<String>> {
            match self.comm.get(&pid) {
                Some(s) => Ok(Some(s.to_string())),
                None => bail!("no comm for {}", pid),
            }
        }

        fn status_name(&self, pid: u32) -> Result<Option<String>> {
            Ok(self.status.get(&pid).map(|s| s.to_string()))
        }
    }

    fn enumerate(fake: FakeProcs) -> Vec<(u32, String)> {
        let names = FakeProcs {
            listing: None,
            comm: fake.comm.clone(),
            status: fake.status.clone(),
        };
        ProcessEnumerator::new(fake, names)
            .enumerate()
            .iter()
            .map(|r| (r.pid, r.name.clone()))
            .collect()
    }

    #[test]
    fn test_unresolvable_process_is_dropped_and_rest_sorted() {
        let mut fake = FakeProcs::with_pids(&[5, 2, 9]);
        fake.comm.insert(5, "name5\n");
        fake.comm.insert(9, "name9\n");

        assert_eq!(
            enumerate(fake),
            vec![(5, "name5".to_string()), (9, "name9".to_string())]
        );
    }

    #[test]
    fn test_status_fallback_when_comm_empty_or_missing() {
        let mut fake = FakeProcs::with_pids(&[10, 11]);
        fake.comm.insert(10, "   \n");
        fake.status.insert(10, "\tkworker/0:1 ");
        fake.status.insert(11, "systemd");

        assert_eq!(
            enumerate(fake),
            vec![(10, "kworker/0:1".to_string()), (11, "systemd".to_string())]
        );
    }

    #[test]
    fn test_listing_name_wins() {
        let mut fake = FakeProcs::with_pids(&[]);
        fake.listing = Some(vec![
            ListedProcess { pid: 4, name: Some("System".into()) },
            ListedProcess { pid: 0, name: Some("[System Process]".into()) },
            ListedProcess { pid: 7, name: Some("".into()) },
        ]);
        fake.comm.insert(4, "ignored");
        fake.comm.insert(7, "explorer.exe");

        assert_eq!(
            enumerate(fake),
            vec![(4, "System".to_string()), (7, "explorer.exe".to_string())]
        );
    }

    #[test]
    fn test_listing_failure_is_empty_snapshot() {
        let mut fake = FakeProcs::with_pids(&[]);
        fake.listing = None;
        assert!(enumerate(fake).is_empty());
    }

    #[test]
    fn test_zero_processes_is_empty_snapshot() {
        assert!(enumerate(FakeProcs::with_pids(&[])).is_empty());
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("bash\n"), Some("bash".to_string()));
        assert_eq!(clean_name(" \r\n"), None);
        assert_eq!(clean_name(""), None);
    }
}
