/*!
Supporting data structures shared by the automaton algorithms.
*/

pub mod case_folding;

pub(crate) mod fnv;
pub(crate) mod int_set;
pub(crate) mod sparse_set;
