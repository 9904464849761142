//! Grouping of content-identical tags.
//!
//! Tags that share a digest point at the same image, so listings collapse
//! them into one entry. Groups and the tags inside them are ordered by
//! recency: most recently updated first, ties broken by the higher tag id so
//! the output depends only on the set of input tags.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::entities::Tag;
use crate::domain::value_objects::Digest;

/// Partition `tags` by digest, newest group first
pub fn group_by_digest(tags: Vec<Tag>) -> Vec<Vec<Tag>> {
    let mut by_digest: BTreeMap<Digest, Vec<Tag>> = BTreeMap::new();
    for tag in tags {
        by_digest.entry(tag.digest().clone()).or_default().push(tag);
    }

    let mut groups: Vec<Vec<Tag>> = by_digest
        .into_values()
        .map(|mut group| {
            group.sort_by(by_recency);
            group
        })
        .collect();

    // Each group is non-empty and already sorted, so its head is its newest tag
    groups.sort_by(|a, b| by_recency(&a[0], &b[0]));
    groups
}

fn by_recency(a: &Tag, b: &Tag) -> Ordering {
    b.updated_at()
        .cmp(&a.updated_at())
        .then_with(|| b.id().cmp(&a.id()))
}
