//! # Classwork Macros
//!
//! Procedural macros for declaring the inputs of construction stages.
//!
//! ## Available Macros
//!
//! - `#[stage]` - Declare the inputs of a construction-stage function
//! - `#[inputs]` - Derive a stage manifest from a struct's fields

use darling::{ast::NestedMeta, FromMeta};
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{parse_macro_input, Fields, ItemFn, ItemStruct, Type};

/// Stage attribute arguments.
#[derive(Debug, FromMeta)]
struct StageArgs {
    #[darling(default)]
    requires: Option<String>,
    #[darling(default)]
    required: Option<String>,
}

/// Split a comma-separated name list, rejecting names that are not identifiers.
fn parse_names(list: Option<&str>) -> syn::Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    for name in list.unwrap_or_default().split(',').map(str::trim) {
        if name.is_empty() {
            continue;
        }
        let valid = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(syn::Error::new(
                Span::call_site(),
                format!("invalid input name `{name}`"),
            ));
        }
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

fn param_spec(name: &str, required: bool) -> TokenStream2 {
    if required {
        quote! { classwork_protocols::ParamSpec::new(#name).required() }
    } else {
        quote! { classwork_protocols::ParamSpec::new(#name) }
    }
}

/// Declare the inputs read by a construction-stage function.
///
/// Generates a sibling `<fn>_manifest()` returning the stage's
/// `StageManifest`. Names listed in `required` fail construction when no
/// value is available.
///
/// # Example
///
/// ```ignore
/// use classwork_macros::stage;
///
/// #[stage(requires = "logger, port", required = "logger")]
/// fn construct_server(this: &mut Instance, args: &Args) -> Result<ConstructOutcome, LifecycleError> {
///     this.set("port", args.i64("port").unwrap_or(80));
///     Ok(ConstructOutcome::Continue)
/// }
///
/// let class = ClassDef::builder()
///     .construct(construct_server_manifest(), construct_server)
///     .build();
/// ```
#[proc_macro_attribute]
pub fn stage(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr_args = match NestedMeta::parse_meta_list(attr.into()) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(e.to_compile_error()),
    };

    let args = match StageArgs::from_list(&attr_args) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(e.write_errors()),
    };

    let input = parse_macro_input!(item as ItemFn);
    let vis = &input.vis;
    let fn_name = &input.sig.ident;
    let manifest_fn = format_ident!("{}_manifest", fn_name);

    let (mut names, required) = match (
        parse_names(args.requires.as_deref()),
        parse_names(args.required.as_deref()),
    ) {
        (Ok(names), Ok(required)) => (names, required),
        (Err(e), _) | (_, Err(e)) => return TokenStream::from(e.to_compile_error()),
    };
    // Required names are inputs too, even when not repeated in `requires`
    for name in &required {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }

    let params = names
        .iter()
        .map(|name| param_spec(name, required.contains(name)));
    let doc = format!("Declared inputs of [`{fn_name}`].");

    let expanded = quote! {
        #input

        #[doc = #doc]
        #vis fn #manifest_fn() -> classwork_protocols::StageManifest {
            classwork_protocols::StageManifest::new()
                #(.param(#params))*
        }
    };

    TokenStream::from(expanded)
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}

/// Derive a stage manifest from a struct with named fields.
///
/// Each field is one input named after the field. `Option<_>` fields are
/// optional, every other field is required.
///
/// # Example
///
/// ```ignore
/// use classwork_macros::inputs;
///
/// #[inputs]
/// struct ServerInputs {
///     logger: Logger,
///     port: Option<u16>,
/// }
///
/// let class = ClassDef::builder()
///     .construct(ServerInputs::manifest(), construct_server)
///     .build();
/// ```
#[proc_macro_attribute]
pub fn inputs(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return TokenStream::from(
            syn::Error::new(Span::call_site(), "#[inputs] takes no arguments").to_compile_error(),
        );
    }

    let input = parse_macro_input!(item as ItemStruct);
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Fields::Named(fields) = &input.fields else {
        return TokenStream::from(
            syn::Error::new_spanned(&input.ident, "#[inputs] requires named fields")
                .to_compile_error(),
        );
    };

    let params = fields.named.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        let name = ident.to_string();
        let name = name.strip_prefix("r#").unwrap_or(&name).to_string();
        Some(param_spec(&name, !is_option(&field.ty)))
    });

    let expanded = quote! {
        #input

        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Stage manifest listing one input per field.
            pub fn manifest() -> classwork_protocols::StageManifest {
                classwork_protocols::StageManifest::new()
                    #(.param(#params))*
            }
        }
    };

    TokenStream::from(expanded)
}
