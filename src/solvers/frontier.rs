use std::collections::VecDeque;

use super::tree::NodeId;

/// A pending search node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierEntry {
    /// Lower is expanded first
    pub priority: f64,
    pub node: NodeId,
    /// Number of steps from the start to this node
    pub length: u32,
}

/// How the frontier orders its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// First in, first out. Priorities are ignored.
    Fifo,
    /// Ascending priority; entries with equal priority stay in insertion order.
    Ascending,
}

/// The set of discovered but not yet expanded nodes.
#[derive(Debug)]
pub struct Frontier {
    discipline: Discipline,
    entries: VecDeque<FrontierEntry>,
}

impl Frontier {
    pub fn new(discipline: Discipline) -> Self {
        Frontier {
            discipline,
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, entry: FrontierEntry) {
        match self.discipline {
            Discipline::Fifo => self.entries.push_back(entry),
            Discipline::Ascending => {
                // Insert before the first entry with a strictly greater priority, which keeps
                // the entries sorted and ties in FIFO order.
                let index = self
                    .entries
                    .partition_point(|e| e.priority <= entry.priority);
                self.entries.insert(index, entry);
            }
        }
    }

    /// Removes the entry to expand next.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::tree::SearchTree;

    fn entries(priorities: &[f64]) -> Vec<FrontierEntry> {
        let mut tree = SearchTree::new();
        priorities
            .iter()
            .enumerate()
            .map(|(i, &priority)| FrontierEntry {
                priority,
                node: tree.insert((i as u8, 0), None),
                length: 0,
            })
            .collect()
    }

    fn drain(frontier: &mut Frontier) -> Vec<FrontierEntry> {
        std::iter::from_fn(|| frontier.pop()).collect()
    }

    #[test]
    fn test_fifo_ignores_priority() {
        let input = entries(&[3.0, 1.0, 2.0]);
        let mut frontier = Frontier::new(Discipline::Fifo);
        input.iter().for_each(|&e| frontier.push(e));
        assert_eq!(drain(&mut frontier), input);
    }

    #[test]
    fn test_ascending_is_stable() {
        let input = entries(&[2.0, 1.0, 2.0, 1.0, 0.5]);
        let mut frontier = Frontier::new(Discipline::Ascending);
        input.iter().for_each(|&e| frontier.push(e));
        assert_eq!(frontier.len(), 5);

        let order = drain(&mut frontier);
        let expected = [4, 1, 3, 0, 2].map(|i| input[i]);
        assert_eq!(order, expected);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_ascending_stays_sorted_between_pops() {
        let input = entries(&[5.0, 4.0, 6.0, 4.5]);
        let mut frontier = Frontier::new(Discipline::Ascending);
        frontier.push(input[0]);
        frontier.push(input[1]);
        assert_eq!(frontier.pop(), Some(input[1]));
        frontier.push(input[2]);
        frontier.push(input[3]);
        let priorities = drain(&mut frontier)
            .iter()
            .map(|e| e.priority)
            .collect::<Vec<_>>();
        assert_eq!(priorities, vec![4.5, 5.0, 6.0]);
    }
}
