//! Helpers shared by backend implementations

use super::GraphHost;

/// Pair every item with a copy of `tag`
pub fn pair_with_tag<T, P: Clone>(items: impl IntoIterator<Item = T>, tag: P) -> Vec<(T, P)> {
    items.into_iter().map(|item| (item, tag.clone())).collect()
}

/// Case-insensitive substring match. An empty search matches nothing.
pub fn name_matches(name: &str, search: &str) -> bool {
    !search.is_empty() && name.to_lowercase().contains(&search.to_lowercase())
}

/// Replace the host's selection with the entities whose name matches
/// `search`. Entities without a name never match.
pub fn select_matching<T, P>(
    host: &mut dyn GraphHost<T, P>,
    search: &str,
    name_of: impl Fn(&T) -> Option<String>,
) {
    if search.is_empty() {
        host.select_entities(&|_: &T| false);
        return;
    }
    tracing::trace!(search, "selecting entities by name");
    host.select_entities(&|entity: &T| {
        name_of(entity).is_some_and(|name| name_matches(&name, search))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Relation;
    use crate::geometry::Vec2;

    /// Host that only evaluates selection predicates
    struct Entities {
        all: Vec<String>,
        selected: Vec<String>,
    }

    impl Entities {
        fn new(names: &[&str]) -> Self {
            Self {
                all: names.iter().map(|s| s.to_string()).collect(),
                selected: vec!["stale".to_string()],
            }
        }
    }

    impl GraphHost<String, ()> for Entities {
        fn find_relations(&self, _entity: &String) -> Vec<Relation<String, ()>> {
            Vec::new()
        }
        fn add_entity(&mut self, _entity: String, _position: Vec2) {}
        fn remove_entity(&mut self, _entity: &String) {}
        fn add_relation(&mut self, _relation: Relation<String, ()>) {}
        fn remove_relation(&mut self, _relation: &Relation<String, ()>) {}
        fn init_relation(&mut self, _sources: &[String]) {}
        fn select_entities(&mut self, predicate: &dyn Fn(&String) -> bool) {
            let selected = self.all.iter().filter(|e| predicate(*e));
            self.selected = selected.cloned().collect();
        }
    }

    #[test]
    fn pairs_share_the_tag() {
        assert_eq!(pair_with_tag([1, 2], "t"), vec![(1, "t"), (2, "t")]);
        assert!(pair_with_tag(Vec::<u8>::new(), 0).is_empty());
    }

    #[test]
    fn matching_ignores_case() {
        assert!(name_matches("GoblinKing", "king"));
        assert!(name_matches("goblin", "GOB"));
        assert!(!name_matches("goblin", "elf"));
        assert!(!name_matches("goblin", ""));
    }

    #[test]
    fn empty_search_clears_selection() {
        let mut host = Entities::new(&["a", "b"]);
        select_matching(&mut host, "", |e: &String| Some(e.clone()));
        assert!(host.selected.is_empty());
    }

    #[test]
    fn search_selects_matching_names() {
        let mut host = Entities::new(&["Sword", "Shield", "swordfish"]);
        select_matching(&mut host, "SWORD", |e: &String| Some(e.clone()));
        assert_eq!(host.selected, ["Sword", "swordfish"]);
    }

    #[test]
    fn unnamed_entities_never_match() {
        let mut host = Entities::new(&["Sword"]);
        select_matching(&mut host, "s", |_: &String| None);
        assert!(host.selected.is_empty());
    }
}
