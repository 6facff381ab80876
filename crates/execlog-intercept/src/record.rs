//! Records emitted around an intercepted call

use std::fmt;

/// Point of the call a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Finish,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Finish => write!(f, "finish"),
        }
    }
}

/// One log line of an intercepted call.
///
/// Optional members are only present when the call site asked for them.
/// `elapsed_ms` is set on finish records only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptionRecord {
    pub stage: Stage,
    pub method: String,
    pub class: String,
    pub parameters: Option<String>,
    pub result: Option<String>,
    pub elapsed_ms: Option<u64>,
}

impl fmt::Display for InterceptionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stage={}, method={}, class={}",
            self.stage, self.method, self.class
        )?;
        if let Some(parameters) = &self.parameters {
            write!(f, ", parameters={}", parameters)?;
        }
        if let Some(result) = &self.result {
            write!(f, ", result={}", result)?;
        }
        if let Some(elapsed_ms) = self.elapsed_ms {
            write!(f, ", time-execution={}ms", elapsed_ms)?;
        }
        Ok(())
    }
}
