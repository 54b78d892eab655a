//! Attribute parsing shared by the derive

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::Attribute;
use syn::LitStr;
use syn::meta::ParseNestedMeta;

/// Case conventions accepted by `rename_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "lowercase" => Some(Self::Lower),
            "UPPERCASE" => Some(Self::Upper),
            "PascalCase" => Some(Self::Pascal),
            "camelCase" => Some(Self::Camel),
            "snake_case" => Some(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnake),
            "kebab-case" => Some(Self::Kebab),
            "SCREAMING-KEBAB-CASE" => Some(Self::ScreamingKebab),
            _ => None,
        }
    }

    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase(),
            Self::Pascal => name.to_upper_camel_case(),
            Self::Camel => name.to_lower_camel_case(),
            Self::Snake => name.to_snake_case(),
            Self::ScreamingSnake => name.to_shouty_snake_case(),
            Self::Kebab => name.to_kebab_case(),
            Self::ScreamingKebab => name.to_shouty_kebab_case(),
        }
    }
}

/// `rename`, `rename_all`, and `skip` gathered from `#[typo(...)]` and `#[serde(...)]`
///
/// `typo` attributes win over `serde` ones.
#[derive(Debug, Default)]
pub struct NameAttrs {
    pub rename:     Option<String>,
    pub rename_all: Option<RenameRule>,
    pub skip:       bool,
}

impl NameAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut typo = Self::default();
        let mut serde = Self::default();

        for attr in attrs {
            if attr.path().is_ident("typo") {
                attr.parse_nested_meta(|meta| typo.apply(&meta, true))?;
            } else if attr.path().is_ident("serde") {
                // Serde has many keys we do not model; those are skipped. An
                // attribute that fails to parse contributes nothing.
                let mut scratch = Self::default();
                if attr.parse_nested_meta(|meta| scratch.apply(&meta, false)).is_ok() {
                    serde.merge(scratch);
                }
            }
        }

        Ok(Self {
            rename:     typo.rename.or(serde.rename),
            rename_all: typo.rename_all.or(serde.rename_all),
            skip:       typo.skip || serde.skip,
        })
    }

    fn merge(&mut self, other: Self) {
        self.rename = other.rename.or_else(|| self.rename.take());
        self.rename_all = other.rename_all.or(self.rename_all);
        self.skip |= other.skip;
    }

    fn apply(&mut self, meta: &ParseNestedMeta<'_>, strict: bool) -> syn::Result<()> {
        // Serde's `rename(serialize = "..")` split form is not modeled
        let split_form = !strict && meta.input.peek(syn::token::Paren);
        if split_form {
            skip_meta(meta)?;
        } else if meta.path.is_ident("rename") {
            self.rename = Some(meta.value()?.parse::<LitStr>()?.value());
        } else if meta.path.is_ident("rename_all") {
            let value = meta.value()?.parse::<LitStr>()?;
            match RenameRule::parse(&value.value()) {
                Some(rule) => self.rename_all = Some(rule),
                None if strict => {
                    return Err(syn::Error::new(value.span(), "unknown rename_all rule"));
                }
                None => {}
            }
        } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
            self.skip = true;
        } else if strict {
            return Err(meta.error("unsupported typo attribute"));
        } else {
            skip_meta(meta)?;
        }
        Ok(())
    }
}

/// Consume the value or nested list of a key we do not model
fn skip_meta(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|nested| skip_meta(&nested))?;
    }
    Ok(())
}
