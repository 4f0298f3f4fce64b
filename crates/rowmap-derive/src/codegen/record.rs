//! `Fields` and `Record` impl generation.

use crate::parse::{FieldInput, RecordInput};
use proc_macro2::TokenStream;
use quote::quote;
use syn::parse_quote;

/// Generate the `Fields` and `Record` implementations.
pub fn generate(input: &RecordInput) -> syn::Result<TokenStream> {
    let struct_name = &input.ident;
    let krate: syn::Path = input
        .krate
        .clone()
        .unwrap_or_else(|| parse_quote!(::rowmap));
    let generics = bounded_generics(input, &krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = input.fields();
    let descriptors = fields
        .iter()
        .map(|field| field_descriptor(&krate, field));

    let mut ref_arms = TokenStream::new();
    let mut mut_arms = TokenStream::new();
    for (index, field) in fields.iter().enumerate() {
        // Ignored fields keep their index but are never accessed
        if field.is_ignored() {
            continue;
        }
        let ident = field.ident();
        if field.flatten {
            ref_arms.extend(quote! {
                #index => ::std::option::Option::Some(#krate::FieldRef::Record(&self.#ident)),
            });
            mut_arms.extend(quote! {
                #index => ::std::option::Option::Some(#krate::FieldMut::Record(&mut self.#ident)),
            });
        } else {
            ref_arms.extend(quote! {
                #index => ::std::option::Option::Some(#krate::FieldRef::Cell(&self.#ident)),
            });
            mut_arms.extend(quote! {
                #index => ::std::option::Option::Some(#krate::FieldMut::Cell(&mut self.#ident)),
            });
        }
    }

    Ok(quote! {
        impl #impl_generics #krate::Fields for #struct_name #ty_generics #where_clause {
            fn field(&self, index: usize) -> ::std::option::Option<#krate::FieldRef<'_>> {
                match index {
                    #ref_arms
                    _ => ::std::option::Option::None,
                }
            }

            fn field_mut(&mut self, index: usize) -> ::std::option::Option<#krate::FieldMut<'_>> {
                match index {
                    #mut_arms
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl #impl_generics #krate::Record for #struct_name #ty_generics #where_clause {
            fn descriptor() -> #krate::TypeDescriptor {
                #krate::TypeDescriptor::record::<Self>(::std::vec![#(#descriptors),*])
            }
        }
    })
}

/// Add the bounds the generated impls rely on: `'static` type parameters and
/// a `Cell` or `Record` bound per accessed field type.
fn bounded_generics(input: &RecordInput, krate: &syn::Path) -> syn::Generics {
    let mut generics = input.generics.clone();
    if generics.type_params().next().is_none() {
        return generics;
    }

    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }

    let where_clause = generics.make_where_clause();
    for field in input.fields() {
        if field.is_ignored() {
            continue;
        }
        let ty = &field.ty;
        let predicate: syn::WherePredicate = if field.flatten {
            parse_quote!(#ty: #krate::Record)
        } else {
            parse_quote!(#ty: #krate::Cell)
        };
        where_clause.predicates.push(predicate);
    }
    generics
}

/// Generate the `FieldDescriptor` expression for one field.
fn field_descriptor(krate: &syn::Path, field: &FieldInput) -> TokenStream {
    let name = field.name();
    let ty = &field.ty;
    let tag = match &field.tag {
        Some(tag) => quote!(::std::option::Option::Some(#tag)),
        None => quote!(::std::option::Option::None),
    };

    if field.is_ignored() {
        quote!(#krate::FieldDescriptor::opaque(#name, #tag))
    } else if field.flatten {
        quote!(#krate::FieldDescriptor::record(
            #name,
            #tag,
            <#ty as #krate::Record>::descriptor,
        ))
    } else {
        quote!(#krate::FieldDescriptor::cell(
            #name,
            #tag,
            <#ty as #krate::Cell>::FIELD_TYPE,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darling::FromDeriveInput;

    fn expand(input: syn::DeriveInput) -> String {
        let parsed = RecordInput::from_derive_input(&input).unwrap();
        generate(&parsed).unwrap().to_string()
    }

    #[test]
    fn test_generates_both_impls() {
        let out = expand(parse_quote! {
            struct User {
                #[csv(tag = "id,omitempty")]
                id: Option<i64>,
                name: String,
            }
        });

        assert!(out.contains(":: rowmap :: Fields for User"));
        assert!(out.contains(":: rowmap :: Record for User"));
        assert!(out.contains("\"id,omitempty\""));
        assert!(out.contains("FieldDescriptor :: cell"));
    }

    #[test]
    fn test_flatten_and_ignore() {
        let out = expand(parse_quote! {
            struct User {
                #[csv(flatten)]
                address: Address,
                #[csv(tag = "-")]
                other: HashMap<String, String>,
            }
        });

        assert!(out.contains("FieldDescriptor :: record"));
        assert!(out.contains("FieldRef :: Record (& self . address)"));
        assert!(out.contains("FieldDescriptor :: opaque"));
        assert!(!out.contains("self . other"));
    }

    #[test]
    fn test_custom_crate_path() {
        let out = expand(parse_quote! {
            #[csv(crate = "rowmap_core")]
            struct Point {
                x: i32,
            }
        });

        assert!(out.contains("rowmap_core :: Record for Point"));
        assert!(!out.contains(":: rowmap ::"));
    }

    #[test]
    fn test_named_flatten_is_rejected() {
        let input: syn::DeriveInput = parse_quote! {
            struct User {
                #[csv(flatten, tag = "addr")]
                address: Address,
            }
        };
        assert!(super::super::expand(&input).is_err());
    }

    #[test]
    fn test_generic_struct_gets_bounds() {
        let out = expand(parse_quote! {
            struct Row<T, A> {
                value: T,
                #[csv(flatten)]
                extra: A,
                #[csv(tag = "-")]
                cache: Vec<T>,
            }
        });

        assert!(out.contains("T : 'static"));
        assert!(out.contains("T : :: rowmap :: Cell"));
        assert!(out.contains("A : :: rowmap :: Record"));
        assert!(!out.contains("Vec < T > : :: rowmap"));
    }

    #[test]
    fn test_lifetime_parameter_is_rejected() {
        let input: syn::DeriveInput = parse_quote! {
            struct Borrowed<'a> {
                name: &'a str,
            }
        };
        assert!(super::super::expand(&input).is_err());
    }
}
