//! Interactive collection of physical targets

use crate::error::{LinkError, Result};
use crate::mapping::PathMapping;
use crate::scan::Discovery;
use crate::util::validate_target;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Synchronous source of operator answers
pub trait Prompter {
    /// Ask for one line; `None` when input is closed
    fn ask(&mut self, question: &str) -> Result<Option<String>>;

    /// Tell the operator why an answer was rejected
    fn reject(&mut self, message: &str) -> Result<()>;
}

/// Prompter over any reader/writer pair (stdin/stdout in the CLI)
pub struct StdioPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdioPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for StdioPrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn reject(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "  ! {message}")?;
        Ok(())
    }
}

/// Merge discovered paths into `existing`, asking only for unmapped ones
///
/// Existing entries, including ones differing only by case, are never
/// re-prompted or changed. Blank and relative answers are asked again.
pub fn collect<P: Prompter>(
    existing: PathMapping,
    discovered: &Discovery,
    prompter: &mut P,
) -> Result<PathMapping> {
    let mut mapping = existing;
    let pending: Vec<&str> = discovered
        .paths()
        .filter(|logical| mapping.find_ignore_case(logical).is_none())
        .collect();

    if pending.is_empty() {
        info!("All {} discovered paths are already mapped", discovered.len());
        return Ok(mapping);
    }

    info!("{} logical paths need a target", pending.len());
    for logical in pending {
        let target = ask_target(prompter, logical)?;
        debug!("Mapped {} -> {}", logical, target);
        mapping.insert(logical, target);
    }

    Ok(mapping)
}

fn ask_target<P: Prompter>(prompter: &mut P, logical: &str) -> Result<String> {
    let question = format!("Target directory for '{logical}': ");
    loop {
        let Some(answer) = prompter.ask(&question)? else {
            return Err(LinkError::PromptAborted(logical.to_string()));
        };

        match validate_target(logical, &answer) {
            Ok(target) => return Ok(target),
            Err(LinkError::InvalidTarget { reason, .. }) => {
                warn!("Rejected target for {}: {}", logical, reason);
                prompter.reject(&reason)?;
            }
            Err(e) => return Err(e),
        }
    }
}
