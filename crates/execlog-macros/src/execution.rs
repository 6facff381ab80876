//! Code generation for `#[log_execution]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{FnArg, ItemFn, LitBool, LitStr, Pat, ReturnType, Type};

/// Arguments of `#[log_execution(...)]`
pub struct ExecutionArgs {
    log_return: bool,
    log_parameters: bool,
    class: Option<LitStr>,
}

impl Default for ExecutionArgs {
    fn default() -> Self {
        Self {
            log_return: true,
            log_parameters: true,
            class: None,
        }
    }
}

impl ExecutionArgs {
    pub fn parser(&mut self) -> impl syn::parse::Parser<Output = ()> + '_ {
        syn::meta::parser(move |meta| {
            if meta.path.is_ident("log_return") {
                self.log_return = meta.value()?.parse::<LitBool>()?.value;
                Ok(())
            } else if meta.path.is_ident("log_parameters") {
                self.log_parameters = meta.value()?.parse::<LitBool>()?.value;
                Ok(())
            } else if meta.path.is_ident("class") {
                self.class = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported log_execution argument, expected `log_return`, `log_parameters` or `class`",
                ))
            }
        })
    }
}

pub fn expand(args: ExecutionArgs, function: ItemFn) -> syn::Result<TokenStream> {
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = function;

    if let Some(constness) = &sig.constness {
        return Err(syn::Error::new_spanned(
            constness,
            "log_execution cannot be applied to a const fn",
        ));
    }

    let ret = match &sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => {
            if matches!(**ty, Type::ImplTrait(_)) {
                return Err(syn::Error::new_spanned(
                    ty,
                    "log_execution needs a concrete return type, found `impl Trait`",
                ));
            }
            quote! { #ty }
        }
    };

    let method = sig.ident.to_string().trim_start_matches("r#").to_string();
    let class = match (&args.class, sig.receiver()) {
        (Some(class), _) => quote! { #class },
        (None, Some(_)) => quote! { ::execlog_intercept::short_type_name::<Self>() },
        (None, None) => quote! { ::execlog_intercept::site::last_segment(::core::module_path!()) },
    };

    let mut arguments = Vec::new();
    if args.log_parameters {
        for input in &sig.inputs {
            let FnArg::Typed(typed) = input else {
                continue;
            };
            match &*typed.pat {
                Pat::Ident(pat) => {
                    let ident = &pat.ident;
                    arguments.push(quote! { .arg(&#ident) });
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "logged parameters must be bound to a name; use `log_parameters = false` to log without them",
                    ));
                }
            }
        }
    }

    let log_return = args.log_return;
    let log_parameters = args.log_parameters;

    let call = if sig.asyncness.is_some() {
        quote! { async move #block.await }
    } else {
        quote! { (move || #block)() }
    };

    let finish = if returns_result(&sig.output) {
        if log_return {
            quote! {
                if let ::core::result::Result::Ok(__execlog_value) = &__execlog_result {
                    __execlog.finish(
                        &__execlog_site,
                        __execlog_options,
                        ::core::option::Option::Some(__execlog_value as &dyn ::execlog_intercept::LogValue),
                        __execlog_elapsed,
                    );
                }
            }
        } else {
            quote! {
                if __execlog_result.is_ok() {
                    __execlog.finish(&__execlog_site, __execlog_options, ::core::option::Option::None, __execlog_elapsed);
                }
            }
        }
    } else {
        let value = if log_return {
            quote! { ::core::option::Option::Some(&__execlog_result as &dyn ::execlog_intercept::LogValue) }
        } else {
            quote! { ::core::option::Option::None }
        };
        quote! {
            __execlog.finish(&__execlog_site, __execlog_options, #value, __execlog_elapsed);
        }
    };

    Ok(quote! {
        #(#attrs)*
        #vis #sig {
            let __execlog_site = ::execlog_intercept::CallSite::new(#method, #class) #(#arguments)*;
            let __execlog_options = ::execlog_intercept::LogOptions::new(#log_return, #log_parameters);
            let __execlog = ::execlog_intercept::Interceptor::tracing();

            __execlog.enter(&__execlog_site, __execlog_options);
            let __execlog_started = ::std::time::Instant::now();
            let __execlog_result: #ret = #call;
            let __execlog_elapsed = __execlog_started.elapsed();

            #finish
            __execlog_result
        }
    })
}

/// Whether the declared return type is a `Result`, aliases such as
/// `io::Result<T>` included
fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    match &**ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Result"),
        _ => false,
    }
}
