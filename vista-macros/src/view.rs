//! Implementation of the `#[view]` attribute macro
//!
//! Parses a trait-shaped capability declaration, records every method shape
//! in a static descriptor, and generates the concrete adapter struct with
//! accessors for the well-formed getter/setter shapes.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, FnArg, ItemTrait, Pat, PatType, Path, ReturnType, TraitItem, TraitItemFn,
    Type, TypeParamBound,
};

use crate::common::{accessor_parts, to_camel};

/// Entry point for the `#[view]` attribute macro.
pub fn view_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "[vista] #[view] takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as ItemTrait);

    match parse_declaration(&input) {
        Ok(decl) => generate_output(&decl).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// One declared method, in descriptor form plus whatever is needed to
/// generate its accessor.
struct DeclaredMethod {
    /// Declaration-convention name recorded in the descriptor.
    convention_name: String,
    /// Number of parameters, excluding the receiver.
    params: usize,
    /// Whether the declared return type is unit.
    is_void: bool,
    /// The original trait method, for idents, types, and doc attributes.
    item: TraitItemFn,
}

/// A parsed capability declaration.
struct Declaration {
    vis: syn::Visibility,
    name: syn::Ident,
    attrs: Vec<syn::Attribute>,
    parents: Vec<Path>,
    methods: Vec<DeclaredMethod>,
}

// ============================================================================
// Parsing
// ============================================================================

fn parse_declaration(input: &ItemTrait) -> syn::Result<Declaration> {
    if let Some(unsafety) = &input.unsafety {
        return Err(syn::Error::new_spanned(
            unsafety,
            "[vista] view declarations cannot be unsafe",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "[vista] view declarations cannot be generic",
        ));
    }

    let mut parents = Vec::new();
    for bound in &input.supertraits {
        match bound {
            TypeParamBound::Trait(t) => parents.push(t.path.clone()),
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "[vista] view supertraits must be other view types",
                ));
            }
        }
    }

    let mut methods = Vec::new();
    for item in &input.items {
        let TraitItem::Fn(method) = item else {
            return Err(syn::Error::new_spanned(
                item,
                "[vista] only methods may appear in a view declaration",
            ));
        };
        methods.push(parse_method(method)?);
    }

    Ok(Declaration {
        vis: input.vis.clone(),
        name: input.ident.clone(),
        attrs: input.attrs.clone(),
        parents,
        methods,
    })
}

fn parse_method(method: &TraitItemFn) -> syn::Result<DeclaredMethod> {
    if method.default.is_some() {
        return Err(syn::Error::new_spanned(
            method,
            "[vista] view method declarations have no bodies",
        ));
    }
    if !method.sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &method.sig.generics,
            "[vista] view methods cannot be generic",
        ));
    }

    let mut inputs = method.sig.inputs.iter();
    match inputs.next() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        _ => {
            return Err(syn::Error::new_spanned(
                &method.sig,
                "[vista] view methods take `&self`",
            ));
        }
    }

    let mut params = 0;
    for input in inputs {
        let FnArg::Typed(PatType { pat, .. }) = input else {
            return Err(syn::Error::new_spanned(
                input,
                "[vista] normal typed argument expected (name: type)",
            ));
        };
        if !matches!(&**pat, Pat::Ident(_)) {
            return Err(syn::Error::new_spanned(
                pat,
                "[vista] no pattern matching supported in view methods",
            ));
        }
        params += 1;
    }

    let is_void = match &method.sig.output {
        ReturnType::Default => true,
        ReturnType::Type(_, ty) => matches!(&**ty, Type::Tuple(t) if t.elems.is_empty()),
    };

    Ok(DeclaredMethod {
        convention_name: to_camel(&method.sig.ident.to_string()),
        params,
        is_void,
        item: method.clone(),
    })
}

// ============================================================================
// Code Generation
// ============================================================================

/// Generate the adapter struct, descriptor, accessors, and glue impls.
fn generate_output(decl: &Declaration) -> TokenStream2 {
    let vis = &decl.vis;
    let name = &decl.name;
    let name_str = name.to_string();
    let attrs = &decl.attrs;
    let parents = &decl.parents;

    let sig_names: Vec<_> = decl.methods.iter().map(|m| m.convention_name.clone()).collect();
    let sig_params: Vec<_> = decl.methods.iter().map(|m| m.params).collect();
    let sig_returns: Vec<_> = decl
        .methods
        .iter()
        .map(|m| {
            if m.is_void {
                quote! { ::vista_view::Returns::Void }
            } else {
                quote! { ::vista_view::Returns::Value }
            }
        })
        .collect();

    let accessors: Vec<_> = decl.methods.iter().filter_map(generate_accessor).collect();

    quote! {
        #(#attrs)*
        #vis struct #name {
            object: ::vista_view::GraphObject,
        }

        impl ::vista_view::ViewType for #name {
            fn descriptor() -> &'static ::vista_view::ViewDescriptor {
                static DESCRIPTOR: ::vista_view::ViewDescriptor = ::vista_view::ViewDescriptor {
                    name: #name_str,
                    extends: &[
                        <::vista_view::GraphObject as ::vista_view::ViewType>::descriptor,
                        #( <#parents as ::vista_view::ViewType>::descriptor, )*
                    ],
                    methods: &[
                        #( ::vista_view::MethodSig {
                            name: #sig_names,
                            params: #sig_params,
                            returns: #sig_returns,
                        }, )*
                    ],
                };
                &DESCRIPTOR
            }

            fn from_object(object: ::vista_view::GraphObject) -> Self {
                Self { object }
            }

            fn object(&self) -> &::vista_view::GraphObject {
                &self.object
            }
        }

        impl #name {
            #(#accessors)*
        }

        impl ::vista_view::Element for #name {
            const KIND: ::vista_view::ElementKind = ::vista_view::ElementKind::View;

            fn element_name() -> &'static str {
                #name_str
            }

            fn descriptor() -> Option<&'static ::vista_view::ViewDescriptor> {
                Some(<Self as ::vista_view::ViewType>::descriptor())
            }

            fn read(node: &::vista_view::Node) -> Option<Self> {
                ::vista_view::GraphObject::wrap::<Self>(node.as_object()?).ok()
            }

            fn to_node(&self) -> ::vista_view::Node {
                ::vista_view::Node::Object(::std::rc::Rc::clone(self.object.inner()))
            }
        }

        impl ::core::ops::Deref for #name {
            type Target = ::vista_view::GraphObject;

            fn deref(&self) -> &Self::Target {
                &self.object
            }
        }

        impl ::core::convert::From<#name> for ::vista_view::Node {
            fn from(view: #name) -> Self {
                <#name as ::vista_view::Element>::to_node(&view)
            }
        }

        impl ::core::clone::Clone for #name {
            fn clone(&self) -> Self {
                Self { object: self.object.clone() }
            }
        }

        impl ::core::fmt::Debug for #name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_tuple(#name_str).field(&self.object).finish()
            }
        }

        impl ::core::cmp::PartialEq for #name {
            fn eq(&self, other: &Self) -> bool {
                self.object == other.object
            }
        }

        impl ::core::cmp::PartialEq<::vista_view::GraphObject> for #name {
            fn eq(&self, other: &::vista_view::GraphObject) -> bool {
                self.object == *other
            }
        }

        impl ::core::cmp::PartialEq<#name> for ::vista_view::GraphObject {
            fn eq(&self, other: &#name) -> bool {
                *self == other.object
            }
        }
    }
}

/// Generate the inherent accessor for a well-formed getter/setter shape.
///
/// Ill-formed shapes still enter the descriptor, where validation rejects
/// the whole view at first wrap; generating no accessor for them keeps the
/// adapter compilable so the rejection surfaces at runtime, not before.
fn generate_accessor(method: &DeclaredMethod) -> Option<TokenStream2> {
    let (prefix, suffix) = accessor_parts(&method.convention_name)?;
    let sig = &method.item.sig;
    let attrs = &method.item.attrs;

    match prefix {
        "get" if method.params == 0 && !method.is_void => {
            let ret = match &sig.output {
                ReturnType::Type(_, ty) => ty,
                ReturnType::Default => return None,
            };
            Some(quote! {
                #(#attrs)*
                pub #sig {
                    self.object.get_property::<#ret>(#suffix)
                }
            })
        }
        "set" if method.params == 1 && method.is_void => {
            let value = param_ident(sig)?;
            Some(quote! {
                #(#attrs)*
                pub #sig {
                    self.object.set_property(#suffix, &#value);
                }
            })
        }
        _ => None,
    }
}

/// The single value parameter's ident, for setter bodies.
fn param_ident(sig: &syn::Signature) -> Option<syn::Ident> {
    sig.inputs.iter().find_map(|input| match input {
        FnArg::Typed(PatType { pat, .. }) => match &**pat {
            Pat::Ident(ident) => Some(ident.ident.clone()),
            _ => None,
        },
        _ => None,
    })
}
