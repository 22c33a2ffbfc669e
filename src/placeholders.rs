use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use indexmap::IndexMap;

/// The closed set of placeholder tokens recognized in stub paths and
/// contents. Each token is (pluralize|singularize) composed with one of the
/// four case families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    PluralCamel,
    PluralSlug,
    PluralSnake,
    PluralClass,
    SingularCamel,
    SingularSlug,
    SingularSnake,
    SingularClass,
}

impl Token {
    pub const ALL: [Token; 8] = [
        Token::PluralCamel,
        Token::PluralSlug,
        Token::PluralSnake,
        Token::PluralClass,
        Token::SingularCamel,
        Token::SingularSlug,
        Token::SingularSnake,
        Token::SingularClass,
    ];

    /// The literal marker as it appears in stub files.
    pub fn literal(self) -> &'static str {
        match self {
            Token::PluralCamel => "{{pluralCamel}}",
            Token::PluralSlug => "{{pluralSlug}}",
            Token::PluralSnake => "{{pluralSnake}}",
            Token::PluralClass => "{{pluralClass}}",
            Token::SingularCamel => "{{singularCamel}}",
            Token::SingularSlug => "{{singularSlug}}",
            Token::SingularSnake => "{{singularSnake}}",
            Token::SingularClass => "{{singularClass}}",
        }
    }

    fn value(self, guard: &str) -> String {
        match self {
            Token::PluralCamel => plurale::pluralize(&guard.to_lower_camel_case()),
            Token::PluralSlug => plurale::pluralize(&guard.to_kebab_case()),
            Token::PluralSnake => plurale::pluralize(&guard.to_snake_case()),
            Token::PluralClass => plurale::pluralize(&guard.to_upper_camel_case()),
            Token::SingularCamel => plurale::singularize(&guard.to_lower_camel_case()),
            Token::SingularSlug => plurale::singularize(&guard.to_kebab_case()),
            Token::SingularSnake => plurale::singularize(&guard.to_snake_case()),
            Token::SingularClass => plurale::singularize(&guard.to_upper_camel_case()),
        }
    }
}

/// Ordered literal-to-value mapping for one guard name.
///
/// Pure and deterministic: the same guard string always yields the same
/// eight values. Word boundaries are resolved once by the case transforms,
/// so mixed-delimiter guard names (`"shop manager"`, `"shop_manager"`)
/// agree across all eight outputs.
#[derive(Debug, Clone)]
pub struct PlaceholderMap {
    entries: IndexMap<&'static str, String>,
}

impl PlaceholderMap {
    pub fn for_guard(guard: &str) -> Self {
        let mut entries = IndexMap::new();

        for token in Token::ALL {
            entries.insert(token.literal(), token.value(guard));
        }

        Self { entries }
    }

    pub fn get(&self, token: Token) -> &str {
        // every token is inserted by `for_guard`
        self.entries
            .get(token.literal())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Replaces every occurrence of each known token literal in one
    /// left-to-right pass. Replacement output is never rescanned, so a value
    /// containing another token's literal text is not re-substituted.
    /// Unknown `{{...}}`-shaped text is left untouched.
    pub fn substitute(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        loop {
            if rest.starts_with("{{") {
                if let Some((literal, value)) = self.match_prefix(rest.as_bytes()) {
                    out.push_str(value);
                    rest = &rest[literal.len()..];
                    continue;
                }
            }

            let mut chars = rest.chars();
            match chars.next() {
                Some(c) => {
                    out.push(c);
                    rest = chars.as_str();
                }
                None => break,
            }
        }

        out
    }

    /// Byte-level variant of [`substitute`](Self::substitute). Content that
    /// contains no token (including binary content) passes through unchanged.
    pub fn substitute_bytes(&self, input: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(input.len());
        let mut i = 0;

        while i < input.len() {
            if input[i..].starts_with(b"{{") {
                if let Some((literal, value)) = self.match_prefix(&input[i..]) {
                    out.extend_from_slice(value.as_bytes());
                    i += literal.len();
                    continue;
                }
            }

            out.push(input[i]);
            i += 1;
        }

        out
    }

    fn match_prefix(&self, input: &[u8]) -> Option<(&'static str, &str)> {
        self.entries.iter().find_map(|(literal, value)| {
            input
                .starts_with(literal.as_bytes())
                .then(|| (*literal, value.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_guard_values() {
        let map = PlaceholderMap::for_guard("admin");

        assert_eq!(map.get(Token::PluralCamel), "admins");
        assert_eq!(map.get(Token::PluralSlug), "admins");
        assert_eq!(map.get(Token::PluralSnake), "admins");
        assert_eq!(map.get(Token::PluralClass), "Admins");
        assert_eq!(map.get(Token::SingularCamel), "admin");
        assert_eq!(map.get(Token::SingularSlug), "admin");
        assert_eq!(map.get(Token::SingularSnake), "admin");
        assert_eq!(map.get(Token::SingularClass), "Admin");
    }

    #[test]
    fn test_irregular_guard_values() {
        let map = PlaceholderMap::for_guard("person");

        assert_eq!(map.get(Token::PluralClass), "People");
        assert_eq!(map.get(Token::SingularClass), "Person");
    }

    #[test]
    fn test_multi_word_guard_values() {
        let map = PlaceholderMap::for_guard("shop manager");

        assert_eq!(map.get(Token::PluralCamel), "shopManagers");
        assert_eq!(map.get(Token::PluralSlug), "shop-managers");
        assert_eq!(map.get(Token::PluralSnake), "shop_managers");
        assert_eq!(map.get(Token::PluralClass), "ShopManagers");
        assert_eq!(map.get(Token::SingularCamel), "shopManager");
        assert_eq!(map.get(Token::SingularSlug), "shop-manager");
        assert_eq!(map.get(Token::SingularSnake), "shop_manager");
        assert_eq!(map.get(Token::SingularClass), "ShopManager");
    }

    #[test]
    fn test_mixed_delimiters_agree_on_word_boundaries() {
        let from_space = PlaceholderMap::for_guard("shop manager");
        let from_snake = PlaceholderMap::for_guard("shop_manager");
        let from_kebab = PlaceholderMap::for_guard("shop-manager");
        let from_camel = PlaceholderMap::for_guard("shopManager");

        for token in Token::ALL {
            assert_eq!(from_space.get(token), from_snake.get(token));
            assert_eq!(from_space.get(token), from_kebab.get(token));
            assert_eq!(from_space.get(token), from_camel.get(token));
        }
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let first = PlaceholderMap::for_guard("customer");
        let second = PlaceholderMap::for_guard("customer");

        for token in Token::ALL {
            assert_eq!(first.get(token), second.get(token));
        }
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let map = PlaceholderMap::for_guard("admin");

        assert_eq!(
            map.substitute("class {{singularClass}} extends {{singularClass}}Base"),
            "class Admin extends AdminBase"
        );
        assert_eq!(
            map.substitute("/{{singularSlug}}/{{pluralSnake}}"),
            "/admin/admins"
        );
    }

    #[test]
    fn test_substitute_leaves_unknown_tokens_untouched() {
        let map = PlaceholderMap::for_guard("admin");

        assert_eq!(map.substitute("{{ csrf_field() }}"), "{{ csrf_field() }}");
        assert_eq!(map.substitute("{{unknownToken}}"), "{{unknownToken}}");
    }

    #[test]
    fn test_substitute_never_rescans_output() {
        let map = PlaceholderMap::for_guard("admin");

        // the inner token is replaced; the surrounding text then spells a
        // token literal in the output, which must stay as-is
        assert_eq!(
            map.substitute("{{singul{{singularClass}}arClass}}"),
            "{{singulAdminarClass}}"
        );
    }

    #[test]
    fn test_substitute_bytes_is_noop_without_tokens() {
        let map = PlaceholderMap::for_guard("admin");
        let binary = [0x00_u8, 0x7b, 0x7b, 0xff, 0x01, 0x7d, 0x7d];

        assert_eq!(map.substitute_bytes(&binary), binary);
    }

    #[test]
    fn test_substitute_bytes_matches_str_substitution() {
        let map = PlaceholderMap::for_guard("person");
        let input = "App\\Modules\\{{pluralClass}}\\Models\\{{singularClass}}";

        assert_eq!(
            map.substitute_bytes(input.as_bytes()),
            map.substitute(input).into_bytes()
        );
    }
}
