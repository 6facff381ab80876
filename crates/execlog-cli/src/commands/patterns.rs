use anyhow::Result;
use execlog_mask::MaskedType;

pub fn handle(json: bool) -> Result<()> {
    if json {
        let catalog: serde_json::Map<String, serde_json::Value> = MaskedType::VARIANTS
            .iter()
            .map(|pattern| (pattern.as_str().to_string(), pattern.regex().into()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("{:<12} REGEX", "PATTERN");
    for pattern in MaskedType::VARIANTS {
        println!("{:<12} {}", pattern.as_str(), pattern.regex());
    }

    Ok(())
}
