use crate::error::IdentityError;
use crate::identity::{IdentityVersion, VersionDescriptor, VersionStatus};

/// The outcome of version selection. Carries the recognized major version alongside the
/// descriptor so nothing downstream has to interpret the version id again.
#[derive(Clone, Copy, Debug)]
pub struct Selection<'a> {
    pub version: IdentityVersion,
    pub descriptor: &'a VersionDescriptor,
}

/// Choose the single version to authenticate against. Only stable versions are considered and
/// the newest recognized major version wins. When a document advertises several stable entries
/// of the same major version the first one listed is used. Only the chosen descriptor needs a
/// usable self link.
pub fn select(descriptors: &[VersionDescriptor]) -> Result<Selection<'_>, IdentityError> {
    let mut chosen: Option<Selection<'_>> = None;

    for descriptor in descriptors {
        if descriptor.status() != &VersionStatus::Stable {
            tracing::debug!(
                id = descriptor.id(),
                status = %descriptor.status(),
                "ignoring identity version that isn't stable"
            );
            continue;
        }

        let Some(version) = descriptor.major_version() else {
            tracing::warn!(id = descriptor.id(), "ignoring unrecognized identity version");
            continue;
        };

        let newer = chosen
            .as_ref()
            .map_or(true, |current| version > current.version);

        if newer {
            chosen = Some(Selection { version, descriptor });
        }
    }

    let selection = chosen.ok_or_else(|| IdentityError::UnsupportedVersion {
        advertised: descriptors
            .iter()
            .map(|d| format!("{} {}", d.id(), d.status()))
            .collect(),
    })?;

    let self_link = selection.descriptor.self_link()?;

    tracing::debug!(
        id = selection.descriptor.id(),
        version = %selection.version,
        %self_link,
        "selected identity version"
    );

    Ok(selection)
}
