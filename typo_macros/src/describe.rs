//! Describe derive macro implementation

use proc_macro::TokenStream;
use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::{ToTokens, format_ident, quote};
use syn::visit_mut::{self, VisitMut};
use syn::{
    Data, DataEnum, DataStruct, DeriveInput, Fields, GenericParam, Generics, Ident, Lifetime, Type,
    parse_macro_input, parse_quote,
};

use crate::shared::{NameAttrs, RenameRule};

/// Implementation of the Describe derive macro
pub fn derive_describe_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let container = NameAttrs::parse(&input.attrs)?;
    let slots = Slots::new(&input.ident, &input.generics)?;

    let body = match &input.data {
        Data::Struct(data) => describe_struct(input, data, &container, &slots)?,
        Data::Enum(data) => describe_enum(input, data, &container, &slots)?,
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "Describe cannot be derived for unions",
            ));
        }
    };

    let ident = &input.ident;
    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::typo::Describe));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::typo::Describe for #ident #ty_generics #where_clause {
            fn describe() -> ::typo::descriptor::TypeDescriptor {
                #body
            }
        }
    })
}

/// Generic parameters of the deriving type and the marker types standing in
/// for them inside field lists
struct Slots {
    params:  Vec<Ident>,
    markers: Vec<Ident>,
    self_ty: Type,
}

impl Slots {
    fn new(ident: &Ident, generics: &Generics) -> syn::Result<Self> {
        let mut params = Vec::new();
        let mut markers = Vec::new();
        let mut self_args: Vec<TokenStream2> = Vec::new();

        for param in &generics.params {
            match param {
                GenericParam::Type(type_param) => {
                    let marker = format_ident!("__TypoSlot{}", type_param.ident);
                    self_args.push(quote!(#marker));
                    params.push(type_param.ident.clone());
                    markers.push(marker);
                }
                GenericParam::Lifetime(_) => self_args.push(quote!('static)),
                GenericParam::Const(const_param) => {
                    return Err(syn::Error::new(
                        const_param.ident.span(),
                        "Describe does not support const generic parameters",
                    ));
                }
            }
        }

        let self_ty = if self_args.is_empty() {
            parse_quote!(#ident)
        } else {
            parse_quote!(#ident<#(#self_args),*>)
        };
        Ok(Self {
            params,
            markers,
            self_ty,
        })
    }

    /// Uninhabited marker types, each describing itself as its generic slot
    fn declarations(&self) -> TokenStream2 {
        let declarations = self.params.iter().zip(&self.markers).map(|(param, marker)| {
            let slot = param.to_string();
            quote! {
                #[doc(hidden)]
                enum #marker {}

                impl ::typo::Describe for #marker {
                    fn describe() -> ::typo::descriptor::TypeDescriptor {
                        ::typo::descriptor::TypeDescriptor::generic(#slot)
                    }
                }
            }
        });
        quote!(#(#declarations)*)
    }

    fn parameter_names(&self) -> TokenStream2 {
        let count = self.params.len();
        let names = self.params.iter().map(ToString::to_string);
        quote!(::core::convert::identity::<[&str; #count]>([#(#names),*]))
    }

    /// Arguments of this instantiation, evaluated where the real parameters are in scope
    fn instantiation_arguments(&self) -> TokenStream2 {
        let params = &self.params;
        quote!(::std::vec![#(<#params as ::typo::Describe>::describe()),*])
    }

    /// Arguments of a variant inside a field list: the generic slots themselves
    fn slot_arguments(&self) -> TokenStream2 {
        let markers = &self.markers;
        quote!(::std::vec![#(<#markers as ::typo::Describe>::describe()),*])
    }

    /// Rewrite a field type so it can be named outside the generic impl
    fn rewrite(&self, ty: &Type) -> Type {
        let mut ty = ty.clone();
        SlotRewriter { slots: self }.visit_type_mut(&mut ty);
        ty
    }
}

struct SlotRewriter<'a> {
    slots: &'a Slots,
}

impl VisitMut for SlotRewriter<'_> {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Type::Path(type_path) = ty {
            if type_path.qself.is_none() {
                if type_path.path.is_ident("Self") {
                    *ty = self.slots.self_ty.clone();
                    return;
                }
                let marker = type_path.path.get_ident().and_then(|ident| {
                    self.slots
                        .params
                        .iter()
                        .position(|param| param == ident)
                        .map(|index| self.slots.markers[index].clone())
                });
                if let Some(marker) = marker {
                    *ty = parse_quote!(#marker);
                    return;
                }
            }
        }
        visit_mut::visit_type_mut(self, ty);
    }

    fn visit_lifetime_mut(&mut self, lifetime: &mut Lifetime) {
        *lifetime = Lifetime::new("'static", lifetime.apostrophe);
    }
}

/// Whether `tokens` name `Self` or `ident` anywhere, including inside groups
fn mentions_type(tokens: TokenStream2, ident: &Ident) -> bool {
    tokens.into_iter().any(|token| match token {
        TokenTree::Ident(found) => found == "Self" || found == *ident,
        TokenTree::Group(group) => mentions_type(group.stream(), ident),
        TokenTree::Punct(_) | TokenTree::Literal(_) => false,
    })
}

fn identity(ident: &Ident) -> TokenStream2 {
    let name = ident.to_string();
    quote!(::core::concat!(::core::module_path!(), "::", #name))
}

fn describe_struct(
    input: &DeriveInput,
    data: &DataStruct,
    container: &NameAttrs,
    slots: &Slots,
) -> syn::Result<TokenStream2> {
    // Newtypes serialize as their inner value. One that contains itself keeps
    // the lazy field list below so resolution can reach the cycle guard.
    if let Fields::Unnamed(fields) = &data.fields {
        if fields.unnamed.len() == 1 {
            let inner = &fields.unnamed[0].ty;
            if !mentions_type(inner.to_token_stream(), &input.ident) {
                return Ok(quote!(<#inner as ::typo::Describe>::describe()));
            }
        }
    }

    let base_name = container
        .rename
        .clone()
        .unwrap_or_else(|| input.ident.to_string());
    let identity = identity(&input.ident);
    let field_list = field_list(&data.fields, container.rename_all, slots)?;
    let declarations = slots.declarations();
    let parameters = slots.parameter_names();
    let arguments = slots.instantiation_arguments();

    Ok(quote! {
        #declarations

        fn __typo_fields() -> ::std::vec::Vec<::typo::descriptor::FieldDef> {
            #field_list
        }

        ::typo::descriptor::TypeDescriptor::aggregate(
            ::typo::descriptor::AggregateDef::new(#identity)
                .named(#base_name)
                .type_parameters(#parameters)
                .fields(__typo_fields),
        )
        .with_type_arguments(#arguments)
    })
}

fn describe_enum(
    input: &DeriveInput,
    data: &DataEnum,
    container: &NameAttrs,
    slots: &Slots,
) -> syn::Result<TokenStream2> {
    let identity = identity(&input.ident);
    let base_name = container
        .rename
        .clone()
        .unwrap_or_else(|| input.ident.to_string());

    let mut variants = Vec::new();
    for variant in &data.variants {
        let attrs = NameAttrs::parse(&variant.attrs)?;
        if attrs.skip {
            continue;
        }
        let name = attrs.rename.clone().unwrap_or_else(|| {
            let raw = variant.ident.to_string();
            container.rename_all.map_or_else(|| raw.clone(), |rule| rule.apply(&raw))
        });
        variants.push((variant, attrs, name));
    }

    if variants
        .iter()
        .all(|(variant, ..)| matches!(variant.fields, Fields::Unit))
    {
        let count = variants.len();
        let names = variants.iter().map(|(.., name)| name);
        return Ok(quote! {
            ::typo::descriptor::TypeDescriptor::enumeration(::typo::descriptor::EnumDef::new(
                #identity,
                ::core::convert::identity::<[&str; #count]>([#(#names),*]),
            ))
        });
    }

    let declarations = slots.declarations();
    let parameters = slots.parameter_names();
    let arguments = slots.instantiation_arguments();
    let slot_arguments = slots.slot_arguments();

    let mut field_fns = Vec::new();
    let mut variant_descriptors = Vec::new();
    for (index, (variant, attrs, name)) in variants.iter().enumerate() {
        let fields_fn = format_ident!("__typo_variant_fields_{}", index);
        let field_list = field_list(&variant.fields, attrs.rename_all, slots)?;
        field_fns.push(quote! {
            fn #fields_fn() -> ::std::vec::Vec<::typo::descriptor::FieldDef> {
                #field_list
            }
        });

        let variant_ident = variant.ident.to_string();
        variant_descriptors.push(quote! {
            ::typo::descriptor::TypeDescriptor::aggregate(
                ::typo::descriptor::AggregateDef::new(::core::concat!(#identity, "::", #variant_ident))
                    .named(#name)
                    .type_parameters(#parameters)
                    .fields(#fields_fn),
            )
            .with_type_arguments(#slot_arguments)
        });
    }

    Ok(quote! {
        #declarations

        #(#field_fns)*

        fn __typo_variants() -> ::std::vec::Vec<::typo::descriptor::TypeDescriptor> {
            ::std::vec![#(#variant_descriptors),*]
        }

        ::typo::descriptor::TypeDescriptor::union(
            ::typo::descriptor::UnionDef::new(#identity)
                .named(#base_name)
                .type_parameters(#parameters)
                .variants(__typo_variants),
        )
        .with_type_arguments(#arguments)
    })
}

/// `vec![FieldDef, ...]` for the non-skipped fields; tuple fields are named by position
fn field_list(
    fields: &Fields,
    rename_all: Option<RenameRule>,
    slots: &Slots,
) -> syn::Result<TokenStream2> {
    let mut entries = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let attrs = NameAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let name = match (&attrs.rename, &field.ident) {
            (Some(rename), _) => rename.clone(),
            (None, Some(ident)) => {
                let raw = ident.to_string();
                let raw = raw.strip_prefix("r#").unwrap_or(&raw).to_string();
                rename_all.map_or_else(|| raw.clone(), |rule| rule.apply(&raw))
            }
            (None, None) => index.to_string(),
        };
        let ty = slots.rewrite(&field.ty);
        entries.push(quote! {
            ::typo::descriptor::FieldDef::new(#name, <#ty as ::typo::Describe>::describe())
        });
    }
    Ok(quote!(::std::vec![#(#entries),*]))
}
