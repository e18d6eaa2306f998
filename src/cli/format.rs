//! Format output dispatch helpers

/// Dispatch output by format. The json branch evaluates to a `Result`,
/// the human branch is a block returning `()`.
///
/// ```rust,ignore
/// output_by_format_result!(cli.format,
///     json => print_json(&value),
///     human => { println!("done"); }
/// )?;
/// ```
macro_rules! output_by_format_result {
    ($format:expr, json => $json:expr, human => $human:block) => {
        match $format {
            $crate::cli::OutputFormat::Json => $json,
            $crate::cli::OutputFormat::Human => {
                $human;
                Ok(())
            }
        }
    };
}

pub(crate) use output_by_format_result;

/// Print a value as pretty JSON on stdout
pub fn print_json(value: &impl serde::Serialize) -> topomap_core::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
