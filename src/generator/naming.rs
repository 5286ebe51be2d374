//! Identifier normalization for resource paths and field names.

/// Identifier produced for an empty or degenerate path.
pub const ROOT_NAME: &str = "Root";

/// Upper-case the first character, leaving the rest untouched.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert a resource path (plus an optional method name) into an identifier.
///
/// Path-parameter braces are dropped, every run of non-alphanumeric
/// characters separates words, each word is title-cased and the words are
/// concatenated in path order, so `/users/{id}` with `Get` becomes
/// `UsersIdGet`.
///
/// ```rust
/// use ramlgen::generator::normalize_name;
///
/// assert_eq!(normalize_name("/users/{id}", Some("get")), "UsersIdGet");
/// assert_eq!(normalize_name("/", None), "Root");
/// ```
pub fn normalize_name(path: &str, segment_title: Option<&str>) -> String {
    let mut name: String = path
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(title_case)
        .collect();
    if name.is_empty() {
        name = ROOT_NAME.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, 'N');
    }
    if let Some(title) = segment_title {
        name.push_str(&normalize_word(title));
    }
    name
}

fn normalize_word(word: &str) -> String {
    word.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(title_case)
        .collect()
}

/// Identifier for a catalog type name, e.g. `user-profile` → `UserProfile`.
///
/// Applied both where a type is defined and where it is referenced, so
/// every reference resolves to the generated definition.
pub fn type_identifier(type_name: &str) -> String {
    normalize_name(type_name, None)
}

/// Lower-cased base name for the files generated per resource.
pub fn resource_file_stem(resource_name: &str) -> String {
    resource_name.to_lowercase()
}

/// Convert `CamelCase`, `camelCase` or `kebab-case` into `snake_case`.
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower_or_digit = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() {
                if prev_lower_or_digit {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
                prev_lower_or_digit = false;
            } else {
                out.push(c);
                prev_lower_or_digit = true;
            }
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
            prev_lower_or_digit = false;
        }
    }
    let trimmed = out.trim_end_matches('_');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Names of the `{param}` segments of a path, in order.
pub fn path_params(path: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        if !name.is_empty() {
            params.push(name.to_string());
        }
        rest = &rest[start + len + 1..];
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_paths() {
        assert_eq!(normalize_name("/users", None), "Users");
        assert_eq!(normalize_name("/users/{id}", None), "UsersId");
        assert_eq!(normalize_name("/users/{id}", Some("Get")), "UsersIdGet");
        assert_eq!(normalize_name("/user-groups/{groupId}", None), "UserGroupsGroupId");
        assert_eq!(normalize_name("/a.b/c_d", None), "ABCD");
    }

    #[test]
    fn test_normalize_name_degenerate() {
        assert_eq!(normalize_name("", None), "Root");
        assert_eq!(normalize_name("/", Some("post")), "RootPost");
        assert_eq!(normalize_name("/{}", None), "Root");
        assert_eq!(normalize_name("/2fa", None), "N2fa");
    }

    #[test]
    fn test_normalize_name_is_deterministic() {
        let a = normalize_name("/orders/{orderId}/items", Some("Patch"));
        let b = normalize_name("/orders/{orderId}/items", Some("Patch"));
        assert_eq!(a, b);
        assert_eq!(a, "OrdersOrderIdItemsPatch");
    }

    #[test]
    fn test_sibling_paths_do_not_collide() {
        assert_ne!(
            normalize_name("/users/{id}", Some("Get")),
            normalize_name("/users", Some("Get"))
        );
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("UsersIdGetReq"), "users_id_get_req");
        assert_eq!(to_snake_case("firstName"), "first_name");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("kebab-case-name"), "kebab_case_name");
        assert_eq!(to_snake_case("v2Api"), "v2_api");
        assert_eq!(to_snake_case("--"), "_");
    }

    #[test]
    fn test_path_params() {
        assert_eq!(path_params("/users/{id}/posts/{postId}"), vec!["id", "postId"]);
        assert!(path_params("/users").is_empty());
        assert!(path_params("/broken/{id").is_empty());
    }

    #[test]
    fn test_type_identifier() {
        assert_eq!(type_identifier("User"), "User");
        assert_eq!(type_identifier("user-profile"), "UserProfile");
        assert_eq!(type_identifier("billing.Address"), "BillingAddress");
        assert_eq!(type_identifier("3d-model"), "N3dModel");
    }

    #[test]
    fn test_resource_file_stem() {
        assert_eq!(resource_file_stem("UsersId"), "usersid");
    }
}
