// ABOUTME: Diagnostics accumulator for non-fatal warnings during commands.
// ABOUTME: Collects warnings that shouldn't fail a command but should be shown to users.

/// Collects non-fatal warnings during command execution.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during command execution.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a version drift warning.
    pub fn version_drift(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::VersionDrift,
            message: message.into(),
        }
    }

    /// Create a probe failure warning.
    pub fn probe_failed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ProbeFailed,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Deployed app reports a different version than the manifest expects.
    VersionDrift,
    /// A health probe failed during manifest generation (recorded, not fatal).
    ProbeFailed,
}
