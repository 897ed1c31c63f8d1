use regex::Regex;

use crate::config::app_config::BindingSection;
use crate::core::errors::{BlobsealError, Result};
use crate::core::models::blob_name::{BlobName, ENCRYPTED_SUFFIX};

/// A blob path template such as `container/incoming/{name}.{extension}`.
///
/// Placeholders are `{ident}`. The last placeholder matches a single
/// path-free, dot-free segment; earlier ones match greedily and may span
/// `/`, so `{name}.{extension}` splits `a/b.tar.gz` into `a/b.tar` and `gz`.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    template: String,
    pattern: Regex,
    placeholders: Vec<String>,
}

enum Part<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

impl PathTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let parts = Self::split(template)?;
        let placeholder_count = parts
            .iter()
            .filter(|p| matches!(p, Part::Placeholder(_)))
            .count();

        let mut pattern = String::from("^");
        let mut placeholders = Vec::new();
        for part in &parts {
            match part {
                Part::Literal(text) => pattern.push_str(&regex::escape(text)),
                Part::Placeholder(ident) => {
                    if placeholders.iter().any(|p: &String| p.as_str() == *ident) {
                        return Err(BlobsealError::Configuration {
                            detail: format!("placeholder {{{ident}}} repeated in '{template}'"),
                        });
                    }
                    placeholders.push(ident.to_string());
                    let class = if placeholders.len() == placeholder_count {
                        "[^./]+"
                    } else {
                        ".+"
                    };
                    pattern.push_str(&format!("(?P<{ident}>{class})"));
                }
            }
        }
        pattern.push('$');

        let pattern = Regex::new(&pattern).map_err(|e| BlobsealError::Configuration {
            detail: format!("invalid path template '{template}': {e}"),
        })?;

        Ok(Self {
            template: template.to_string(),
            pattern,
            placeholders,
        })
    }

    fn split(template: &str) -> Result<Vec<Part<'_>>> {
        let mut parts = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                parts.push(Part::Literal(&rest[..open]));
            }
            let close = rest[open..]
                .find('}')
                .map(|i| open + i)
                .ok_or_else(|| BlobsealError::Configuration {
                    detail: format!("unclosed placeholder in '{template}'"),
                })?;
            let ident = &rest[open + 1..close];
            let valid_ident = !ident.is_empty()
                && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid_ident {
                return Err(BlobsealError::Configuration {
                    detail: format!("invalid placeholder {{{ident}}} in '{template}'"),
                });
            }
            parts.push(Part::Placeholder(ident));
            rest = &rest[close + 1..];
        }

        if rest.contains('}') {
            return Err(BlobsealError::Configuration {
                detail: format!("unmatched '}}' in '{template}'"),
            });
        }
        if !rest.is_empty() {
            parts.push(Part::Literal(rest));
        }

        Ok(parts)
    }

    /// Match a path and return the captured placeholder values in template order.
    pub fn captures(&self, path: &str) -> Option<Vec<(String, String)>> {
        let caps = self.pattern.captures(path)?;
        self.placeholders
            .iter()
            .map(|ident| {
                caps.name(ident)
                    .map(|m| (ident.clone(), m.as_str().to_string()))
            })
            .collect()
    }

    /// Substitute placeholder values. Unknown placeholders render empty.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            // `parse` guarantees every '{' is closed.
            let close = open + rest[open..].find('}').unwrap_or(rest.len() - open);
            let ident = &rest[open + 1..close];
            if let Some((_, value)) = values.iter().find(|(k, _)| *k == ident) {
                out.push_str(value);
            }
            rest = rest.get(close + 1..).unwrap_or("");
        }
        out.push_str(rest);
        out
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.template)
    }
}

/// Binds arriving objects to their encrypted destination.
///
/// Source: `{container}/{source_prefix}/{name}.{extension}`
/// Destination: `{container}/{dest_prefix}/{name}.{extension}.pgp`
#[derive(Debug, Clone)]
pub struct TriggerBinding {
    container: String,
    source_prefix: String,
    source: PathTemplate,
    dest: PathTemplate,
}

impl TriggerBinding {
    pub fn from_config(section: &BindingSection) -> Result<Self> {
        validate_segments(&section.container, "container")?;
        validate_segments(&section.source_prefix, "source_prefix")?;
        validate_segments(&section.dest_prefix, "dest_prefix")?;

        if section.container.contains('/') {
            return Err(BlobsealError::Configuration {
                detail: format!(
                    "container '{}' must be a single path segment",
                    section.container
                ),
            });
        }
        let nested = section
            .dest_prefix
            .strip_prefix(section.source_prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
        if nested {
            return Err(BlobsealError::Configuration {
                detail: format!(
                    "dest_prefix '{}' is inside source_prefix '{}'; encrypted output would \
                     trigger the binding again",
                    section.dest_prefix, section.source_prefix
                ),
            });
        }

        let source = PathTemplate::parse(&format!(
            "{}/{}/{{name}}.{{extension}}",
            section.container, section.source_prefix
        ))?;
        let dest = PathTemplate::parse(&format!(
            "{}/{}/{{name}}.{{extension}}.{ENCRYPTED_SUFFIX}",
            section.container, section.dest_prefix
        ))?;

        Ok(Self {
            container: section.container.clone(),
            source_prefix: section.source_prefix.clone(),
            source,
            dest,
        })
    }

    /// Capture `{name}` and `{extension}` from an arriving object's path.
    pub fn match_source(&self, path: &str) -> Option<BlobName> {
        let captures = self.source.captures(path)?;
        let get = |key: &str| {
            captures
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        Some(BlobName::new(get("name")?, get("extension")?))
    }

    /// Like `match_source`, but a non-matching path is an error.
    pub fn require_source(&self, path: &str) -> Result<BlobName> {
        self.match_source(path)
            .ok_or_else(|| BlobsealError::BindingMismatch {
                path: path.to_string(),
                template: self.source.to_string(),
            })
    }

    /// Path the ciphertext for `blob` is written to.
    pub fn dest_path(&self, blob: &BlobName) -> String {
        self.dest.render(&[
            ("name", blob.name.as_str()),
            ("extension", blob.extension.as_str()),
        ])
    }

    /// `{container}/{source_prefix}`, the directory swept for new objects.
    pub fn source_root(&self) -> String {
        format!("{}/{}", self.container, self.source_prefix)
    }

    pub fn source_template(&self) -> &PathTemplate {
        &self.source
    }

    pub fn dest_template(&self) -> &PathTemplate {
        &self.dest
    }
}

fn validate_segments(value: &str, field: &str) -> Result<()> {
    let invalid = value.is_empty()
        || value
            .split('/')
            .any(|seg| seg.is_empty() || seg == "." || seg == "..")
        || value.contains(['{', '}', '\\']);

    if invalid {
        return Err(BlobsealError::Configuration {
            detail: format!(
                "invalid {field} '{value}': use '/'-separated names without '.', '..', \
                 braces or empty segments"
            ),
        });
    }
    Ok(())
}
