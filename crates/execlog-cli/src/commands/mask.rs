use anyhow::Result;
use execlog_mask::MaskDirective;

pub fn handle(value: &str, pattern: Option<&str>, regex: Option<String>) -> Result<()> {
    let directive = MaskDirective::from_parts(pattern, regex)?;
    tracing::debug!(regex = directive.resolve_regex(), "Masking value");

    println!("{}", directive.apply(value)?);
    Ok(())
}
