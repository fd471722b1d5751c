use crate::core::models::atom::Atom;
use nalgebra::distance;

/// Euclidean distance between two atoms, in Angstroms.
pub fn atom_distance(a: &Atom, b: &Atom) -> f64 {
    distance(&a.position, &b.position)
}

/// Minimum pairwise distance between two atom sets.
///
/// Returns `None` when either set is empty.
pub fn min_pair_distance<'a, I, J>(first: I, second: J) -> Option<f64>
where
    I: IntoIterator<Item = &'a Atom>,
    J: IntoIterator<Item = &'a Atom> + Clone,
{
    first
        .into_iter()
        .flat_map(|a| second.clone().into_iter().map(move |b| atom_distance(a, b)))
        .min_by(f64::total_cmp)
}
