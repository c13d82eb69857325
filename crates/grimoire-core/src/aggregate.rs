use crate::error::CatalogError;
use crate::model::Spell;

/// Arithmetic mean of `success_rate` over every spell, visible or not.
///
/// # Errors
/// Returns [`CatalogError::EmptyAggregate`] when `spells` is empty.
pub fn compute_mean_quality(spells: &[Spell]) -> Result<f32, CatalogError> {
    if spells.is_empty() {
        return Err(CatalogError::EmptyAggregate);
    }

    let total: f64 = spells.iter().map(|spell| f64::from(spell.success_rate)).sum();
    #[allow(clippy::cast_precision_loss)]
    let count = spells.len() as f64;

    #[allow(clippy::cast_possible_truncation)]
    let mean = (total / count) as f32;
    Ok(mean)
}
