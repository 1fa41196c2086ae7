use log::debug;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;

use super::session::Ticket;
use super::source::SourceFile;
use crate::error::ConvertError;

/// A finished background read, tagged with the selection that asked for it.
#[derive(Debug)]
pub struct ReadDone {
    pub ticket: Ticket,
    pub read: Result<SourceFile, ConvertError>,
}

/// Read `path` on a worker thread and post the outcome to `tx`.
pub fn spawn_read(path: PathBuf, ticket: Ticket, tx: Sender<ReadDone>) {
    thread::spawn(move || {
        let read = SourceFile::read(&path);
        // receiver gone means the UI has exited
        if tx.send(ReadDone { ticket, read }).is_err() {
            debug!("Read of {} finished after shutdown", path.display());
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::converter::Converter;
    use crate::conversion::session::{Completion, Session};
    use std::fs;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn worker_result_feeds_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        fs::write(&path, [10u8, 20]).unwrap();

        let mut session = Session::new(Converter::default());
        let (tx, rx) = mpsc::channel();
        let ticket = session.select(&path).unwrap();
        spawn_read(path, ticket, tx);

        let done = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(done.ticket, ticket);
        let completion = session.complete(done.ticket, done.read).unwrap();
        assert!(matches!(completion, Completion::Converted(r) if r.text == "10 20"));
    }

    #[test]
    fn unreadable_path_reports_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(Converter::default());
        let path = dir.path().join("gone.bin");
        let (tx, rx) = mpsc::channel();
        let ticket = session.select(&path).unwrap();
        spawn_read(path, ticket, tx);

        let done = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(done.read, Err(ConvertError::ReadFailure { .. })));
    }
}
