//! Execution planning: dependency closure plus a stable topological order.

use std::collections::HashMap;

use crate::domain::error::SequencerError;
use crate::domain::step::Selection;

/// Name and dependency edges of one registered step, in registration order.
#[derive(Debug, Clone, Copy)]
pub struct StepNode<'a> {
    pub name: &'a str,
    pub depends_on: &'a [&'a str],
}

/// Resolve `selection` against `nodes` into the indices to execute, in order.
///
/// The result contains the selected steps plus their transitive
/// dependencies. Dependencies always precede dependents; among steps that
/// are ready at the same time, the earliest registered runs first.
///
/// # Errors
///
/// - `UnknownStep` if a selected name is not registered (checked first, so
///   nothing is planned).
/// - `UnknownDependency` if a step in the closure depends on an unregistered
///   name.
/// - `CyclicDependency` if the closure contains a cycle.
pub fn resolve(nodes: &[StepNode<'_>], selection: &Selection) -> Result<Vec<usize>, SequencerError> {
    let index: HashMap<&str, usize> = nodes.iter().enumerate().map(|(i, n)| (n.name, i)).collect();

    let roots: Vec<usize> = match selection {
        Selection::All => (0..nodes.len()).collect(),
        Selection::Steps(names) => names
            .iter()
            .map(|name| {
                index
                    .get(name.as_str())
                    .copied()
                    .ok_or_else(|| SequencerError::UnknownStep(name.clone()))
            })
            .collect::<Result<_, _>>()?,
    };

    // Transitive closure, resolving each edge to an index as we go.
    let mut in_plan = vec![false; nodes.len()];
    let mut deps: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut pending = roots;
    while let Some(i) = pending.pop() {
        if in_plan[i] {
            continue;
        }
        in_plan[i] = true;
        for dep in nodes[i].depends_on {
            let d = index
                .get(dep)
                .copied()
                .ok_or_else(|| SequencerError::UnknownDependency {
                    step: nodes[i].name.to_string(),
                    dependency: (*dep).to_string(),
                })?;
            deps[i].push(d);
            pending.push(d);
        }
    }

    let total = in_plan.iter().filter(|p| **p).count();
    let mut done = vec![false; nodes.len()];
    let mut order = Vec::with_capacity(total);
    while order.len() < total {
        let next = (0..nodes.len())
            .find(|&i| in_plan[i] && !done[i] && deps[i].iter().all(|&d| done[d]));
        match next {
            Some(i) => {
                done[i] = true;
                order.push(i);
            }
            None => {
                let stuck = (0..nodes.len())
                    .find(|&i| in_plan[i] && !done[i])
                    .map_or_else(String::new, |i| nodes[i].name.to_string());
                return Err(SequencerError::CyclicDependency(stuck));
            }
        }
    }
    Ok(order)
}
