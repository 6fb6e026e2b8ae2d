use hashbrown::HashMap;

/// Collision scope of one symbol source. `filter` is handed to the
/// collision index's queries: `None` treats every indexed entry as an
/// obstruction, `Some(id)` only entries tagged with the same group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionGroup {
    pub id: u16,
    pub filter: Option<u16>,
}

/// Assigns collision groups per source. With cross-source collisions on,
/// everything shares one unfiltered group; otherwise each source gets its
/// own group id on first sight, memoized for the life of the placement.
#[derive(Debug)]
pub struct CollisionGroups {
    cross_source_collisions: bool,
    max_group_id: u16,
    groups: HashMap<String, CollisionGroup>,
}

impl CollisionGroups {
    pub fn new(cross_source_collisions: bool) -> Self {
        Self {
            cross_source_collisions,
            max_group_id: 0,
            groups: HashMap::new(),
        }
    }

    pub fn get(&mut self, source_id: &str) -> CollisionGroup {
        if self.cross_source_collisions {
            return CollisionGroup {
                id: 0,
                filter: None,
            };
        }
        if let Some(group) = self.groups.get(source_id) {
            return *group;
        }
        self.max_group_id += 1;
        let group = CollisionGroup {
            id: self.max_group_id,
            filter: Some(self.max_group_id),
        };
        self.groups.insert(source_id.to_owned(), group);
        group
    }
}
