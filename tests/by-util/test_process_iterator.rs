// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use procwalk::{walk_process, Pid, ProcessIterator};

#[cfg(unix)]
use pretty_assertions::assert_eq;
#[cfg(unix)]
use std::fs;

// ============================================================================
// Sentinel
// ============================================================================

#[test]
fn test_end_is_default() {
    assert_eq!(ProcessIterator::end(), ProcessIterator::default());
    assert_eq!(ProcessIterator::default(), ProcessIterator::end());
}

#[test]
fn test_end_stays_end() {
    let mut it = ProcessIterator::end();
    for _ in 0..3 {
        it.advance();
        assert!(it.is_end());
        assert!(it.get().is_none());
    }
}

// ============================================================================
// Live system
// ============================================================================

#[test]
#[cfg(any(target_os = "linux", windows))]
fn test_begin_is_not_end() {
    assert_ne!(ProcessIterator::begin(), ProcessIterator::end());
    assert!(ProcessIterator::try_begin().is_ok());
}

#[test]
#[cfg(any(target_os = "linux", windows))]
fn test_cursor_protocol_visits_current_process_once() {
    let me = std::process::id() as Pid;
    let mut hits = 0;

    let mut it = ProcessIterator::begin();
    while it != ProcessIterator::end() {
        if it.current().pid() == me {
            hits += 1;
            assert_eq!(
                it.current().exe().unwrap(),
                std::env::current_exe().unwrap()
            );
        }
        it.advance();
    }

    assert_eq!(hits, 1);
    it.advance();
    assert!(it.is_end());
}

#[test]
fn test_no_duplicate_pids() {
    let mut pids: Vec<Pid> = walk_process().map(|it| it.pid()).collect();
    let total = pids.len();
    pids.sort_unstable();
    pids.dedup();
    assert_eq!(pids.len(), total);
}

#[test]
fn test_pids_are_well_formed() {
    for process in walk_process() {
        let text = process.to_string();
        assert!(!text.is_empty());
        assert!(text.bytes().all(|b| b.is_ascii_digit()), "bad pid {text}");
        assert_eq!(text.parse::<Pid>().unwrap(), process.pid());
    }
}

#[test]
fn test_exhausted_iterator_stays_exhausted() {
    let mut it = ProcessIterator::begin();
    it.by_ref().for_each(drop);
    assert!(it.is_end());
    assert_eq!(it.next(), None);
    assert_eq!(it, ProcessIterator::end());
}

// ============================================================================
// Simulated process-information roots
// ============================================================================

#[cfg(unix)]
fn fake_proc(pids: &[&str]) -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    for pid in pids {
        fs::create_dir(root.path().join(pid)).unwrap();
    }
    fs::create_dir(root.path().join("sys")).unwrap();
    fs::create_dir(root.path().join("1a")).unwrap();
    fs::write(root.path().join("uptime"), "1.00 2.00").unwrap();
    fs::write(root.path().join("55"), "").unwrap();
    root
}

#[test]
#[cfg(unix)]
fn test_empty_root_yields_end() {
    let root = tempfile::tempdir().unwrap();
    let it = ProcessIterator::begin_at(root.path());
    assert_eq!(it, ProcessIterator::end());
    assert_eq!(it.count(), 0);
}

#[test]
#[cfg(unix)]
fn test_root_without_processes_yields_end() {
    let root = fake_proc(&[]);
    assert!(ProcessIterator::begin_at(root.path()).is_end());
    assert!(ProcessIterator::try_begin_at(root.path()).unwrap().is_end());
}

#[test]
#[cfg(unix)]
fn test_missing_root() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("proc");

    let mut iterations = 0;
    let mut it = ProcessIterator::begin_at(&missing);
    while it != ProcessIterator::end() {
        iterations += 1;
        it.advance();
    }
    assert_eq!(iterations, 0);

    assert!(matches!(
        ProcessIterator::try_begin_at(&missing),
        Err(procwalk::ProcessError::Enumeration { .. })
    ));
}

#[test]
#[cfg(unix)]
fn test_simulated_root_is_filtered() {
    let root = fake_proc(&["1", "17", "2048"]);
    let mut pids: Vec<Pid> = ProcessIterator::begin_at(root.path())
        .map(|it| it.pid())
        .collect();
    pids.sort_unstable();
    assert_eq!(pids, vec![1, 17, 2048]);
}

#[test]
#[cfg(unix)]
fn test_clones_share_the_walk() {
    let root = fake_proc(&["1", "17", "2048"]);
    let mut first = ProcessIterator::begin_at(root.path());
    let mut second = first.clone();
    assert_eq!(first, second);

    // both cursors pull from the same directory walk
    let mut pids = vec![first.current().pid()];
    second.advance();
    pids.push(second.current().pid());
    first.advance();
    pids.push(first.current().pid());
    assert_ne!(first, second);

    first.advance();
    second.advance();
    assert!(first.is_end());
    assert!(second.is_end());

    pids.sort_unstable();
    assert_eq!(pids, vec![1, 17, 2048]);
}
