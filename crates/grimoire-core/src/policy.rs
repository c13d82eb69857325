use crate::error::CatalogError;

/// Role tag whose holders cannot see restricted effects.
pub const RESTRICTED_ROLE: &str = "Student";

const RESTRICTED_EFFECTS: [&str; 2] = ["death", "poison"];

/// Effect vocabulary the selection layers offer. Ingestion accepts any effect string.
pub const KNOWN_CATEGORIES: [&str; 6] =
    ["fire", "bubble", "memory_loss", "healing", "death", "poison"];

#[must_use]
pub fn is_restricted_role(role: &str) -> bool {
    role == RESTRICTED_ROLE
}

/// Decide whether `role` may see spells carrying `category`.
///
/// This is the only place the restricted effects are named; display, lookup and ranking all
/// call it once per spell.
#[must_use]
pub fn is_visible(role: &str, category: &str) -> bool {
    !(is_restricted_role(role) && RESTRICTED_EFFECTS.contains(&category))
}

/// Known effects that `role` is allowed to ask for, in vocabulary order.
#[must_use]
pub fn offerable_categories(role: &str) -> Vec<&'static str> {
    KNOWN_CATEGORIES.into_iter().filter(|category| is_visible(role, category)).collect()
}

/// Validate a requested effect before it is handed to [`crate::find_by_category`].
///
/// The query engine itself never rejects a category; this check belongs to whichever layer
/// collects the request.
///
/// # Errors
/// Returns [`CatalogError::InvalidCategory`] when `category` is outside the known vocabulary
/// or hidden from `role`.
pub fn check_category<'a>(role: &str, category: &'a str) -> Result<&'a str, CatalogError> {
    if KNOWN_CATEGORIES.contains(&category) && is_visible(role, category) {
        Ok(category)
    } else {
        Err(CatalogError::InvalidCategory(category.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn students_cannot_see_poison_or_death() {
        assert!(!is_visible("Student", "poison"));
        assert!(!is_visible("Student", "death"));
    }

    #[test]
    fn students_see_everything_else() {
        assert!(is_visible("Student", "fire"));
        assert!(is_visible("Student", "healing"));
        assert!(is_visible("Student", "unheard_of"));
    }

    #[test]
    fn every_other_role_is_unrestricted() {
        assert!(is_visible("Professor", "death"));
        assert!(is_visible("Headmaster", "poison"));
        // Role tags are compared exactly.
        assert!(is_visible("student", "poison"));
        assert!(is_visible("", "death"));
    }

    #[test]
    fn offerable_categories_drop_restricted_effects_for_students() {
        assert_eq!(
            offerable_categories("Student"),
            vec!["fire", "bubble", "memory_loss", "healing"]
        );
        assert_eq!(offerable_categories("Professor"), KNOWN_CATEGORIES.to_vec());
    }

    #[test]
    fn check_category_rejects_unknown_and_hidden_effects() {
        assert_eq!(check_category("Student", "fire"), Ok("fire"));
        assert_eq!(check_category("Professor", "death"), Ok("death"));
        assert_eq!(
            check_category("Student", "death"),
            Err(CatalogError::InvalidCategory("death".to_string()))
        );
        assert_eq!(
            check_category("Professor", "lightning"),
            Err(CatalogError::InvalidCategory("lightning".to_string()))
        );
    }
}
