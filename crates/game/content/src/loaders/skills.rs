//! Skill catalog loader.

use std::path::Path;

use crate::catalog::SkillCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        Self::parse(&read_file(path)?)
    }

    /// Parse a skill catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        // Bitflags masks (weapon/immunity sets) serialize as RON newtypes;
        // the content files author them as bare strings, so allow the parser
        // to unwrap newtype structs.
        let options = ron::Options::default()
            .with_default_extension(ron::extensions::Extensions::UNWRAP_NEWTYPES);
        let catalog: SkillCatalog = options
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        // Chain references must resolve inside the same catalog; a broken
        // pair would silently never open a window at runtime.
        for skill in &catalog.skills {
            if let Some(group) = &skill.superseding_group
                && catalog.get(group).is_none()
            {
                anyhow::bail!(
                    "Skill '{}' supersedes unknown group '{}'",
                    skill.group,
                    group
                );
            }
            for group in &skill.preceding_groups {
                if catalog.get(group).is_none() {
                    anyhow::bail!(
                        "Skill '{}' references unknown preceding group '{}'",
                        skill.group,
                        group
                    );
                }
            }
        }

        Ok(catalog)
    }
}
