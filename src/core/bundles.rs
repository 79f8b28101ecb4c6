use std::collections::HashMap;

use crate::models::mod_dto::{ModBundle, ModEntry, ModNode};

/// Groups leaves sharing a bundle name into composite nodes.
///
/// Leaves are sorted by name first, so the earliest member of each bundle
/// seeds its description and preview image and children end up
/// name-ordered. A bundle name used by only one archive creates no bundle;
/// that mod surfaces standalone. No mod is ever dropped: the flattened
/// output always has as many leaves as the input.
pub fn resolve(mut mods: Vec<ModEntry>) -> Vec<ModNode> {
    mods.sort_by(|a, b| a.name.cmp(&b.name));

    let mut counts: HashMap<String, usize> = HashMap::new();
    for entry in &mods {
        if !entry.bundle_name.is_empty() {
            *counts.entry(entry.bundle_name.clone()).or_insert(0) += 1;
        }
    }

    let mut nodes: Vec<ModNode> = Vec::with_capacity(mods.len());
    for entry in mods {
        let bundled = !entry.bundle_name.is_empty()
            && counts.get(&entry.bundle_name).is_some_and(|c| *c > 1);
        if !bundled {
            nodes.push(ModNode::Leaf(entry));
            continue;
        }

        // bundles win name lookups over plain leaves
        let existing = nodes.iter_mut().find_map(|node| match node {
            ModNode::Bundle(bundle) if bundle.name == entry.bundle_name => Some(bundle),
            _ => None,
        });
        match existing {
            Some(bundle) => bundle.children.push(entry),
            None => nodes.push(ModNode::Bundle(ModBundle {
                name: entry.bundle_name.clone(),
                description: entry.description.clone(),
                author: entry.author.clone(),
                version: entry.version.clone(),
                preview_path: entry.preview_path.clone(),
                children: vec![entry],
            })),
        }
    }

    // description and preview stay as seeded from the first child
    for node in &mut nodes {
        if let ModNode::Bundle(bundle) = node {
            bundle.version = join_distinct(bundle.children.iter().map(|c| c.version.as_str()));
            bundle.author = join_distinct(bundle.children.iter().map(|c| c.author.as_str()));
        }
    }

    nodes
}

/// Joins values in first-seen order, duplicates dropped.
fn join_distinct<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut distinct: Vec<&str> = Vec::new();
    for value in values {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    distinct.join(", ")
}
