//! Dependency ordering for assembly instructions.
//!
//! Independent of the codec; shares the crate only as a neighbouring
//! utility.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("cycle detected at item {item:?}")]
    CycleDetected { item: String },

    #[error("manifest line {line}: {reason}")]
    Manifest { line: usize, reason: String },
}

#[derive(Debug, Clone)]
struct Item {
    name: String,
    dependencies: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Items with the items they depend on.
///
/// Insertion order is kept, so the resulting order is deterministic.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` and append its dependencies. Names seen only as
    /// dependencies are registered with no dependencies of their own.
    pub fn add_item<S: AsRef<str>>(&mut self, name: &str, dependencies: &[S]) {
        let id = self.intern(name);
        for dep in dependencies {
            let dep_id = self.intern(dep.as_ref());
            self.items[id].dependencies.push(dep_id);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn intern(&mut self, name: &str) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.items.len();
        self.items.push(Item {
            name: name.to_string(),
            dependencies: Vec::new(),
        });
        self.index.insert(name.to_string(), id);
        id
    }

    /// Every item after all of its dependencies.
    ///
    /// Depth-first with an explicit stack; reaching an item that is still
    /// in progress means a cycle.
    pub fn topological_order(&self) -> Result<Vec<String>, OrderError> {
        let mut marks = vec![Mark::Unvisited; self.items.len()];
        let mut order = Vec::with_capacity(self.items.len());

        for start in 0..self.items.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }

            // (item, index of the next dependency to visit)
            let mut stack = vec![(start, 0usize)];
            marks[start] = Mark::InProgress;

            while let Some(top) = stack.last_mut() {
                let id = top.0;
                if let Some(&dep) = self.items[id].dependencies.get(top.1) {
                    top.1 += 1;
                    match marks[dep] {
                        Mark::Unvisited => {
                            marks[dep] = Mark::InProgress;
                            stack.push((dep, 0));
                        }
                        Mark::InProgress => {
                            return Err(OrderError::CycleDetected {
                                item: self.items[dep].name.clone(),
                            });
                        }
                        Mark::Done => {}
                    }
                } else {
                    marks[id] = Mark::Done;
                    order.push(self.items[id].name.clone());
                    stack.pop();
                }
            }
        }

        Ok(order)
    }

    /// Numbered instructions, e.g. `1. Assemble frame`.
    pub fn assembly_steps(&self) -> Result<Vec<String>, OrderError> {
        Ok(self
            .topological_order()?
            .into_iter()
            .enumerate()
            .map(|(i, name)| format!("{}. Assemble {}", i + 1, name))
            .collect())
    }
}

/// Parse `name: dep, dep` lines. Blank lines and `#` comments are ignored;
/// a line without a colon declares an item with no dependencies.
pub fn parse_manifest(text: &str) -> Result<DependencyGraph, OrderError> {
    let mut graph = DependencyGraph::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let (name, deps) = match line.split_once(':') {
            Some((name, deps)) => (name.trim(), deps),
            None => (line, ""),
        };
        if name.is_empty() {
            return Err(OrderError::Manifest {
                line: i + 1,
                reason: "missing item name".to_string(),
            });
        }

        let deps: Vec<&str> = deps
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .collect();
        graph.add_item(name, &deps);
    }
    Ok(graph)
}
