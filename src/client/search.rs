use crate::model::Resource;

/// Case-insensitive substring match over the entity's searchable fields.
pub fn matches<R: Resource>(entity: &R, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    matches_lowercase(entity, &needle)
}

fn matches_lowercase<R: Resource>(entity: &R, needle: &str) -> bool {
    entity
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Entities of `items` matching `query`, in cache order.
///
/// An empty query returns everything.
pub fn filter<'a, R: Resource>(items: &'a [R], query: &str) -> Vec<&'a R> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|entity| matches_lowercase(*entity, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;
    use crate::model::{Project, ProjectDraft};

    fn project(id: u64, draft: ProjectDraft) -> Project {
        Project::from_draft(EntityId::new(id).unwrap(), (), draft)
    }

    fn fixtures() -> Vec<Project> {
        vec![
            project(
                1,
                ProjectDraft {
                    description: "Brain MRI atlas".to_string(),
                    researchers: "Dr. Smith".to_string(),
                    ..ProjectDraft::titled("Neuro imaging")
                },
            ),
            project(
                2,
                ProjectDraft {
                    funding_source: Some("NIH Grant".to_string()),
                    ..ProjectDraft::titled("Cancer screening")
                },
            ),
            project(3, ProjectDraft::titled("Genome atlas")),
        ]
    }

    fn ids(found: Vec<&Project>) -> Vec<u64> {
        found.into_iter().map(|project| project.id.get()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let items = fixtures();
        assert_eq!(ids(filter(&items, "")), [1, 2, 3]);
    }

    #[test]
    fn matches_any_field_ignoring_case() {
        let items = fixtures();
        assert_eq!(ids(filter(&items, "ATLAS")), [1, 3]);
        assert_eq!(ids(filter(&items, "nih")), [2]);
        assert_eq!(ids(filter(&items, "smith")), [1]);
        assert!(filter(&items, "zebrafish").is_empty());
    }

    #[test]
    fn missing_optional_fields_never_match() {
        let items = fixtures();
        assert!(!matches(&items[2], "grant"));
    }
}
