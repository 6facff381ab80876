//! Code generation for `#[derive(LogMask)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Index, Member};

use crate::attrs::{ContainerAttrs, FieldMode, parse_field};

pub fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "LogMask can only be derived for structs, found enum",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "LogMask can only be derived for structs, found union",
            ));
        }
    };

    let container = ContainerAttrs::parse(&input.attrs)?;
    let ident = &input.ident;
    let type_name = container.rename.unwrap_or_else(|| ident.to_string());
    let krate = match container.krate {
        Some(path) => quote! { #path },
        None => quote! { ::execlog_mask },
    };

    let mut pushes = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let (member, name) = match &field.ident {
            Some(field_ident) => (
                Member::Named(field_ident.clone()),
                field_ident.to_string().trim_start_matches("r#").to_string(),
            ),
            None => (Member::Unnamed(Index::from(index)), index.to_string()),
        };

        let push = match parse_field(&field.attrs)? {
            FieldMode::Skip => continue,
            FieldMode::Plain => quote! {
                fields.push(#krate::FieldEntry::new(#name, &self.#member));
            },
            FieldMode::Masked(directive) => {
                let pattern = directive.pattern;
                let regex = directive
                    .regex
                    .map(|regex| quote! { .with_regex(#regex) });
                quote! {
                    fields.push(
                        #krate::FieldEntry::new(#name, &self.#member).masked(
                            #krate::MaskDirective::new(#krate::MaskedType::#pattern)
                                #regex
                        ),
                    );
                }
            }
            FieldMode::Flatten => quote! {
                fields.extend(#krate::LogMask::fields(&self.#member));
            },
        };
        pushes.push(push);
    }

    let capacity = match fields {
        Fields::Unit => 0,
        _ => fields.len(),
    };
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::LogMask for #ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&self) -> ::std::vec::Vec<#krate::FieldEntry<'_>> {
                #[allow(unused_mut)]
                let mut fields = ::std::vec::Vec::with_capacity(#capacity);
                #(#pushes)*
                fields
            }
        }

        impl #impl_generics #krate::LogValue for #ident #ty_generics #where_clause {
            fn kind(&self) -> #krate::ValueKind {
                #krate::ValueKind::Object
            }

            fn log_string(&self) -> #krate::Result<::std::string::String> {
                #krate::LogMask::render(self)
            }
        }
    })
}
