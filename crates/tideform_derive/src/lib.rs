use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derives the typed seed/hydrate bridge between a plain struct and a
/// form's keyed value map. Each named field converts through
/// `FormValue`'s `From`/`TryFrom` impls, so field types are limited to
/// text-like and list-like values.
#[proc_macro_derive(ValueModel)]
pub fn derive_value_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            input.ident,
            "ValueModel derive currently supports only non-generic structs",
        )
        .to_compile_error()
        .into();
    }

    let model_ident = input.ident;

    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new(
                    Span::call_site(),
                    "ValueModel derive requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new(
                Span::call_site(),
                "ValueModel derive is only supported on structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let krate = tideform_path();
    let mut names = Vec::new();
    let mut to_entries = Vec::new();
    let mut from_entries = Vec::new();

    for field in named_fields {
        let Some(field_ident) = field.ident else {
            continue;
        };
        let field_name = field_ident.to_string();
        names.push(quote! { #field_name });

        to_entries.push(quote! {
            values.insert(
                #field_name.to_string(),
                #krate::form::FormValue::from(self.#field_ident.clone()),
            );
        });

        from_entries.push(quote! {
            #field_ident: #krate::form::get_value(values, #field_name)?
                .clone()
                .try_into()
                .ok()?,
        });
    }

    quote! {
        impl #krate::form::ValueModel for #model_ident {
            fn field_names() -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn to_values(&self) -> #krate::form::ValueMap {
                let mut values = #krate::form::ValueMap::new();
                #(#to_entries)*
                values
            }

            fn from_values(values: &#krate::form::ValueMap) -> ::core::option::Option<Self> {
                ::core::option::Option::Some(Self {
                    #(#from_entries)*
                })
            }
        }
    }
    .into()
}

fn tideform_path() -> TokenStream2 {
    match crate_name("tideform") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::tideform),
    }
}
