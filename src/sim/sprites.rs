//! Resolved image packs
//!
//! Built once when a game starts. Every category is checked to be non-empty
//! up front, so entities can pick sprites during a step without failing.

use std::collections::HashMap;

use rand::Rng;

use crate::error::{Error, Result};
use crate::platform::{Category, Host, Region};

#[derive(Debug, Clone)]
pub struct SpriteSheet {
    packs: HashMap<Category, Vec<Region>>,
}

impl SpriteSheet {
    /// Resolve every category from the host. Fails if any is empty.
    pub fn from_host(host: &dyn Host) -> Result<Self> {
        let mut packs = HashMap::new();
        for category in Category::ALL {
            let regions: Vec<Region> = host
                .region_names(category)
                .iter()
                .filter_map(|name| host.find_region(category, name))
                .collect();
            if regions.is_empty() {
                return Err(Error::MissingAssets(category));
            }
            packs.insert(category, regions);
        }
        Ok(Self { packs })
    }

    pub fn regions(&self, category: Category) -> &[Region] {
        self.packs.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, category: Category, name: &str) -> Option<&Region> {
        self.regions(category).iter().find(|r| r.name == name)
    }

    /// Uniformly random image from a category
    pub fn random(&self, category: Category, rng: &mut impl Rng) -> Region {
        let regions = self.regions(category);
        debug_assert!(!regions.is_empty(), "sprite sheet built without {category}");
        regions[rng.random_range(0..regions.len())].clone()
    }

    /// The player's sprite: the selected character, or the first one
    pub fn character(&self, selected: Option<&str>) -> Result<Region> {
        match selected {
            Some(name) => self
                .find(Category::Characters, name)
                .cloned()
                .ok_or_else(|| Error::UnknownCharacter(name.to_string())),
            None => Ok(self.regions(Category::Characters)[0].clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessHost;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_missing_category_is_config_error() {
        let mut host = HeadlessHost::new(800.0, 600.0).preloaded();
        host.add_region(Category::Characters, Region::new("a", 10, 10));
        let err = SpriteSheet::from_host(&host).unwrap_err();
        assert!(matches!(err, Error::MissingAssets(Category::Enemies)));
    }

    #[test]
    fn test_character_lookup() {
        let host = HeadlessHost::with_default_sprites(800.0, 600.0).preloaded();
        let sheet = SpriteSheet::from_host(&host).unwrap();
        assert_eq!(sheet.character(Some("bookworm")).unwrap().name, "bookworm");
        assert_eq!(sheet.character(None).unwrap().name, "librarian");
        assert!(matches!(
            sheet.character(Some("nobody")),
            Err(Error::UnknownCharacter(_))
        ));
    }

    #[test]
    fn test_random_stays_in_category() {
        let host = HeadlessHost::with_default_sprites(800.0, 600.0).preloaded();
        let sheet = SpriteSheet::from_host(&host).unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..20 {
            let region = sheet.random(Category::Enemies, &mut rng);
            assert!(sheet.find(Category::Enemies, &region.name).is_some());
        }
    }
}
