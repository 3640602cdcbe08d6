//! Extract entries and render the generator program.

use crate::config::GeneratorConfig;
use crate::entry::ResolvedEntry;
use crate::errors::{ConfigError, GenerateError};
use crate::extract::Extractor;
use crate::render::ProgramTemplate;
use crate::source::read_lines;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

/// Matching entries with codes, in input order. Entries whose code would
/// overflow are dropped like non-matching lines.
pub fn resolve_entries<'a, I, S>(
    extractor: &'a Extractor,
    code_base: u64,
    lines: I,
) -> impl Iterator<Item = ResolvedEntry> + 'a
where
    I: IntoIterator<Item = S>,
    I::IntoIter: 'a,
    S: AsRef<str>,
{
    extractor.extract(lines).filter_map(move |entry| {
        let name = entry.name.clone();
        let resolved = entry.resolve(code_base);
        if resolved.is_none() {
            debug!("Skipping {}: code overflows with base {}", name, code_base);
        }
        resolved
    })
}

/// Render the complete program for `lines`.
pub fn generate_with<I, S>(extractor: &Extractor, template: &ProgramTemplate, lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = template.render_header();
    let mut count = 0usize;
    for entry in resolve_entries(extractor, template.code_base, lines) {
        out.push_str(&template.render_entry(&entry));
        count += 1;
    }
    out.push_str(&template.render_footer());
    info!("Generated {} error entries", count);
    out
}

/// Stream the program for `lines` to `writer`, returning the entry count.
pub fn write_program<W, I, S>(
    writer: &mut W,
    extractor: &Extractor,
    template: &ProgramTemplate,
    lines: I,
) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    writer.write_all(template.render_header().as_bytes())?;
    let mut count = 0usize;
    for entry in resolve_entries(extractor, template.code_base, lines) {
        writer.write_all(template.render_entry(&entry).as_bytes())?;
        count += 1;
    }
    writer.write_all(template.render_footer().as_bytes())?;
    writer.flush()?;
    info!("Generated {} error entries", count);
    Ok(count)
}

/// Pure transform from input lines to program text.
pub fn generate<I, S>(lines: I, config: &GeneratorConfig) -> Result<String, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let extractor = Extractor::new(&config.extract_config())?;
    Ok(generate_with(&extractor, &config.template(), lines))
}

/// Read `path` and render its program.
pub fn generate_from_path(path: &Path, config: &GeneratorConfig) -> Result<String, GenerateError> {
    let extractor = Extractor::new(&config.extract_config())?;
    let lines = read_lines(path)?;
    Ok(generate_with(&extractor, &config.template(), lines))
}

/// Matching entries of `lines` with codes.
pub fn collect_entries<I, S>(
    lines: I,
    config: &GeneratorConfig,
) -> Result<Vec<ResolvedEntry>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let extractor = Extractor::new(&config.extract_config())?;
    Ok(resolve_entries(&extractor, config.code_base, lines).collect())
}
