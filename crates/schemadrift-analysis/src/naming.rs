//! Identifier case conversion and entity name variants.

/// `totalAmount` -> `total_amount`, `userID` -> `user_id`.
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if matches!(prev, Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit()) {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// `total_amount` -> `totalAmount`. Leading underscores are preserved.
pub fn snake_to_camel(name: &str) -> String {
    let leading = name.len() - name.trim_start_matches('_').len();
    let mut out = String::with_capacity(name.len());
    out.push_str(&name[..leading]);
    let mut upper_next = false;
    for c in name[leading..].chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `order_items` -> `OrderItems`.
pub fn snake_to_pascal(name: &str) -> String {
    let camel = snake_to_camel(name.trim_start_matches('_'));
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// True for `camelCase` identifiers: starts lowercase, has an uppercase letter, no underscores.
pub fn is_camel_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_lowercase())
        && name.chars().any(|c| c.is_ascii_uppercase())
        && !name.contains('_')
}

/// True for `snake_case` identifiers with at least one inner underscore.
pub fn is_snake_case(name: &str) -> bool {
    let trimmed = name.trim_matches('_');
    trimmed.contains('_')
        && trimmed
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// True when `name` is a plain identifier (letters, digits, `_`, `$`; no leading digit).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Naive English plural: `category` -> `categories`, `address` -> `addresses`, `user` -> `users`.
pub fn pluralize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.ends_with('y')
        && !matches!(lower.chars().rev().nth(1), Some('a' | 'e' | 'i' | 'o' | 'u'))
        && word.len() > 1
    {
        format!("{}ies", &word[..word.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

/// Naive English singular, the inverse of [`pluralize`] for common cases.
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if ["sses", "xes", "zes", "ches", "shes"]
        .iter()
        .any(|s| lower.ends_with(s))
    {
        word[..word.len() - 2].to_string()
    } else if lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && word.len() > 1
    {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Lower-cased spellings under which an entity may appear in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityVariants {
    pub name: String,
    pub lower: String,
    pub plural: String,
    pub singular: String,
}

impl EntityVariants {
    pub fn new(entity: &str) -> Self {
        let lower = entity.to_lowercase();
        Self {
            name: entity.to_string(),
            plural: pluralize(&lower),
            singular: singularize(&lower),
            lower,
        }
    }

    /// The distinct lowercase spellings, entity name first.
    pub fn spellings(&self) -> Vec<&str> {
        let mut out = vec![self.lower.as_str()];
        for v in [self.plural.as_str(), self.singular.as_str()] {
            if !v.is_empty() && !out.contains(&v) {
                out.push(v);
            }
        }
        out
    }

    /// True when `lower_haystack` (already lowercased) contains any spelling.
    pub fn appears_in(&self, lower_haystack: &str) -> bool {
        self.spellings().iter().any(|v| lower_haystack.contains(v))
    }

    /// True when a name taken from code refers to this entity, ignoring case and number.
    pub fn names(&self, candidate: &str) -> bool {
        let candidate = candidate.to_lowercase();
        self.spellings().contains(&candidate.as_str())
            || singularize(&candidate) == self.singular
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_snake_conversions() {
        assert_eq!(camel_to_snake("totalAmount"), "total_amount");
        assert_eq!(camel_to_snake("userId"), "user_id");
        assert_eq!(camel_to_snake("userID"), "user_id");
        assert_eq!(camel_to_snake("address2Line"), "address2_line");
        assert_eq!(camel_to_snake("email"), "email");
        assert_eq!(snake_to_camel("total_amount"), "totalAmount");
        assert_eq!(snake_to_camel("_private_field"), "_privateField");
        assert_eq!(snake_to_pascal("order_items"), "OrderItems");
    }

    #[test]
    fn case_predicates() {
        assert!(is_camel_case("createdAt"));
        assert!(!is_camel_case("created"));
        assert!(!is_camel_case("CreatedAt"));
        assert!(is_snake_case("created_at"));
        assert!(!is_snake_case("created"));
        assert!(!is_snake_case("Created_At"));
        assert!(is_identifier("$scope"));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("total amount"));
    }

    #[test]
    fn plural_and_singular() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("class"), "class");
    }

    #[test]
    fn entity_variants_match_case_and_number() {
        let v = EntityVariants::new("OrderItem");
        assert_eq!(v.spellings(), vec!["orderitem", "orderitems"]);
        assert!(v.appears_in("const orderitems = []"));
        assert!(v.names("orderItems"));
        assert!(!v.names("order"));
    }
}
