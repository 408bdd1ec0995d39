//! Community-based content recommendation

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::cluster::Partition;
use crate::error::Result;
use crate::graph::NodeId;
use crate::recommend::{ContentId, ContentInteractions};

/// Most popular content among the members of a user's community.
///
/// Occurrences are tallied over every member (the user included). Ties keep
/// the order in which content was first seen, visiting members by ascending id.
pub fn recommend_content(
    user: NodeId,
    partition: &Partition,
    interactions: &ContentInteractions,
    k: usize,
) -> Result<Vec<ContentId>> {
    let community = partition.community_of(user)?;
    let members = partition.members(community);

    // (content, count) in first-occurrence order
    let mut tallies: Vec<(&ContentId, usize)> = Vec::new();
    let mut positions: HashMap<&ContentId, usize> = HashMap::new();

    for member in members {
        for content in interactions.get(member) {
            match positions.get(content) {
                Some(&pos) => tallies[pos].1 += 1,
                None => {
                    positions.insert(content, tallies.len());
                    tallies.push((content, 1));
                }
            }
        }
    }

    // Stable sort keeps first-occurrence order among equal counts
    tallies.sort_by_key(|&(_, count)| Reverse(count));

    log::debug!(
        "Community {} of user {} has {} distinct content items",
        community,
        user,
        tallies.len()
    );

    Ok(tallies
        .into_iter()
        .take(k)
        .map(|(content, _)| content.clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counts_across_community() {
        let partition = Partition::from_assignments(vec![(1, 0), (2, 0)]);
        let interactions: ContentInteractions =
            vec![(1, vec!["A", "B"]), (2, vec!["A"])].into_iter().collect();

        let recs = recommend_content(1, &partition, &interactions, 2).unwrap();
        assert_eq!(recs, strings(&["A", "B"]));
    }

    #[test]
    fn test_ties_follow_first_occurrence() {
        let partition = Partition::from_assignments(vec![(1, 0), (2, 0), (3, 1)]);
        let interactions: ContentInteractions = vec![
            (2, vec!["C", "D"]),
            (1, vec!["B", "C"]),
            (3, vec!["Z", "Z", "Z"]),
        ]
        .into_iter()
        .collect();

        let recs = recommend_content(2, &partition, &interactions, 5).unwrap();
        assert_eq!(recs, strings(&["C", "B", "D"]));
    }

    #[test]
    fn test_truncates_to_k() {
        let partition = Partition::from_assignments(vec![(1, 0)]);
        let interactions: ContentInteractions =
            vec![(1, vec!["A", "B", "C"])].into_iter().collect();
        assert_eq!(recommend_content(1, &partition, &interactions, 1).unwrap().len(), 1);
        assert!(recommend_content(1, &partition, &interactions, 0).unwrap().is_empty());
    }

    #[test]
    fn test_no_interactions_is_empty() {
        let partition = Partition::from_assignments(vec![(1, 0), (2, 0)]);
        let recs = recommend_content(1, &partition, &ContentInteractions::new(), 5).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_unknown_user() {
        let partition = Partition::from_assignments(vec![(1, 0)]);
        assert_eq!(
            recommend_content(7, &partition, &ContentInteractions::new(), 5),
            Err(AnalysisError::UserNotFound { node: 7 })
        );
    }

    #[test]
    fn test_deterministic() {
        let partition = Partition::from_assignments(vec![(1, 0), (2, 0), (3, 0)]);
        let interactions: ContentInteractions = vec![
            (3, vec!["X", "Y"]),
            (1, vec!["Y", "W"]),
            (2, vec!["W", "X"]),
        ]
        .into_iter()
        .collect();

        let first = recommend_content(1, &partition, &interactions, 3).unwrap();
        for _ in 0..5 {
            assert_eq!(recommend_content(1, &partition, &interactions, 3).unwrap(), first);
        }
        assert_eq!(first, strings(&["Y", "W", "X"]));
    }
}
