//! Hash containers built on *hashbrown* and *foldhash*.
//!
//! Name indices use a fixed seed so that their iteration order, and with it
//! everything logged or generated from them, is the same from run to run.

/// The build hasher of [`HashMap`] and [`HashSet`]: `foldhash` with its
/// default fixed seed.
pub type FixedState = foldhash::fast::FixedState;

pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedState>;

pub type HashSet<T> = hashbrown::HashSet<T, FixedState>;

pub use foldhash;
pub use hashbrown;

#[cfg(test)]
mod tests {
    use super::{FixedState, HashSet};
    use core::hash::BuildHasher;

    #[test]
    fn seeds_do_not_vary() {
        assert_eq!(FixedState::default().hash_one("id"), FixedState::default().hash_one("id"));

        let names: HashSet<&str> = ["a", "b", "a"].into_iter().collect();
        assert_eq!(names.len(), 2);
    }
}
