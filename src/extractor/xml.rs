use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::models::DependencyDeclaration;

/// Fields collected from one `<PackageReference>` / `<PackageVersion>` element.
#[derive(Default)]
struct PendingEntry {
    id: String,
    version: String,
    nested_version: String,
}

impl PendingEntry {
    /// Fails on a malformed attribute or an undefined entity in its value.
    fn from_attributes(e: &BytesStart) -> Result<Self> {
        let mut entry = PendingEntry::default();
        for attr in e.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            match key.as_str() {
                "Include" => entry.id = attr.unescape_value()?.trim().to_string(),
                "Version" => entry.version = attr.unescape_value()?.trim().to_string(),
                _ => {}
            }
        }
        Ok(entry)
    }

    /// The `Version` attribute wins over a nested `<Version>` element.
    /// Entries missing either field are dropped.
    fn finish(self) -> Option<DependencyDeclaration> {
        let version = if self.version.is_empty() {
            self.nested_version.trim().to_string()
        } else {
            self.version
        };
        if self.id.is_empty() || version.is_empty() {
            log::debug!("skipping entry without id or version: '{}'", self.id);
            return None;
        }
        Some(DependencyDeclaration::new(self.id, version))
    }
}

/// Collect `Include`/`Version` pairs from every element named `element`.
///
/// Element names are compared on their local name, so MSBuild namespaces are
/// ignored. Malformed XML is an error; incomplete entries are skipped.
pub fn read_package_elements(content: &str, element: &str) -> Result<Vec<DependencyDeclaration>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut deps = Vec::new();
    let mut buf = Vec::new();
    let mut pending: Option<PendingEntry> = None;
    let mut in_version = false;

    loop {
        match reader
            .read_event_into(&mut buf)
            .with_context(|| format!("malformed XML at byte {}", reader.buffer_position()))?
        {
            Event::Empty(ref e) => {
                let tag = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                if tag == element {
                    deps.extend(PendingEntry::from_attributes(e)?.finish());
                }
            }
            Event::Start(ref e) => {
                let tag = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                if tag == element {
                    pending = Some(PendingEntry::from_attributes(e)?);
                } else if tag == "Version" && pending.is_some() {
                    in_version = true;
                }
            }
            Event::Text(ref t) if in_version => {
                if let Some(entry) = pending.as_mut() {
                    entry.nested_version.push_str(&t.unescape()?);
                }
            }
            Event::CData(ref t) if in_version => {
                if let Some(entry) = pending.as_mut() {
                    entry.nested_version.push_str(&String::from_utf8_lossy(t));
                }
            }
            Event::End(ref e) => {
                let tag = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                if tag == "Version" {
                    in_version = false;
                } else if tag == element {
                    if let Some(entry) = pending.take() {
                        deps.extend(entry.finish());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(deps)
}
