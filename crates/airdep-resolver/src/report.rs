//! Record of every narrowing step taken during a resolution run.

use std::fmt;

/// The log of all constraint applications, in the order they happened.
#[derive(Debug, Default, Clone)]
pub struct NarrowingReport {
    pub steps: Vec<Narrowing>,
}

/// One application of a constraint to a package's version set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrowing {
    pub package: String,
    pub constraint: String,
    /// The package whose `wants` carried the constraint; `None` for roots.
    pub requested_by: Option<String>,
    /// Versions removed by this step.
    pub removed: Vec<String>,
}

impl NarrowingReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, step: Narrowing) {
        self.steps.push(step);
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Total number of versions removed across all steps.
    pub fn removed_count(&self) -> usize {
        self.steps.iter().map(|s| s.removed.len()).sum()
    }

    /// Steps that narrowed `package`.
    pub fn for_package<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a Narrowing> {
        self.steps.iter().filter(move |s| s.package == package)
    }
}

impl fmt::Display for NarrowingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "No narrowing performed.");
        }
        writeln!(
            f,
            "Narrowing steps ({}, {} versions removed):",
            self.steps.len(),
            self.removed_count()
        )?;
        for step in &self.steps {
            writeln!(f, "  {step}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Narrowing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = self.requested_by.as_deref().unwrap_or("root");
        write!(f, "{} {} (from {origin})", self.package, self.constraint)?;
        if self.removed.is_empty() {
            write!(f, ": nothing removed")
        } else {
            write!(f, ": removed {}", self.removed.join(", "))
        }
    }
}
