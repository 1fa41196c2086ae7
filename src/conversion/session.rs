use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use super::converter::{ConversionResult, Converter};
use super::download;
use super::source::{display_name, SourceFile};
use crate::error::ConvertError;

/// Token handed out per accepted selection. Only the newest one can
/// complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Idle,
    FileSelected { name: String },
    Rejected { name: String },
    Converted { name: String, downloaded: bool },
    /// The read or the conversion of `name` failed.
    Failed { name: String },
}

/// What happened to a read completion.
#[derive(Debug)]
pub enum Completion<'a> {
    Converted(&'a ConversionResult),
    /// A newer selection superseded this read.
    Stale,
}

/// Current source/result pair of one interactive session.
#[derive(Debug)]
pub struct Session {
    converter: Converter,
    generation: u64,
    /// Name of the selection `generation` belongs to.
    in_flight: String,
    state: State,
    source: Option<SourceFile>,
    result: Option<ConversionResult>,
}

impl Session {
    pub fn new(converter: Converter) -> Self {
        Self {
            converter,
            generation: 0,
            in_flight: String::new(),
            state: State::Idle,
            source: None,
            result: None,
        }
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    pub fn source(&self) -> Option<&SourceFile> {
        self.source.as_ref()
    }

    /// Validate a chosen path and issue the ticket its read must carry.
    ///
    /// A rejected name leaves the held result alone.
    pub fn select(&mut self, path: &Path) -> Result<Ticket, ConvertError> {
        let name = display_name(path);
        if let Err(e) = self.converter.validate(&name) {
            warn!("Rejected {name}: {e}");
            self.state = State::Rejected { name };
            return Err(e);
        }
        self.generation += 1;
        debug!("Selected {name} (generation {})", self.generation);
        self.in_flight = name.clone();
        self.state = State::FileSelected { name };
        Ok(Ticket(self.generation))
    }

    /// Feed back the outcome of the read started for `ticket`.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        read: Result<SourceFile, ConvertError>,
    ) -> Result<Completion<'_>, ConvertError> {
        if ticket.0 != self.generation {
            debug!(
                "Dropping stale read (generation {}, current {})",
                ticket.0, self.generation
            );
            return Ok(Completion::Stale);
        }

        let source = match read {
            Ok(source) => source,
            Err(e) => {
                warn!("{e}");
                self.state = State::Failed {
                    name: self.in_flight.clone(),
                };
                return Err(e);
            }
        };

        // the accepted file supersedes whatever was held before
        self.result = None;
        let name = source.name().to_string();
        let converted = self.converter.accept(&source);
        self.source = Some(source);

        match converted {
            Ok(result) => {
                self.state = State::Converted {
                    name,
                    downloaded: false,
                };
                Ok(Completion::Converted(self.result.insert(result)))
            }
            Err(e) => {
                warn!("{e}");
                self.state = State::Failed { name };
                Err(e)
            }
        }
    }

    /// Write the current result into `dir`.
    pub fn download(&mut self, dir: &Path) -> Result<PathBuf, ConvertError> {
        let result = self.result.as_ref().ok_or(ConvertError::NoResultToDownload)?;
        let path = download::save(result, dir)?;
        if let State::Converted { downloaded, .. } = &mut self.state {
            *downloaded = true;
        }
        info!("Download complete: {}", path.display());
        Ok(path)
    }
}
