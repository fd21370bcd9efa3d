use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, PatType, Type};

fn type_name(ty: &Type) -> String {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_default(),
        Type::Reference(reference) => format!("&{}", type_name(&reference.elem)),
        _ => String::new(),
    }
}

/// Turns a plain Rust function into an expression callable.
///
/// The generated function has the signature
/// `fn(&[Value]) -> Result<Value, FunctionError>`, checks the argument count and
/// extracts each typed parameter from the argument slice. Supported parameter
/// types are `f64` (a `Value::Number`), `String` and `&str` (a `Value::Text`).
/// `Value` and `FunctionError` must be in scope at the use site.
#[proc_macro_attribute]
pub fn expression_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let fn_attrs = &input.attrs;
    let fn_vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_args = &input.sig.inputs;
    let fn_body = &input.block;
    let fn_output = &input.sig.output;
    let fn_name_str = fn_name.to_string();

    let mut arg_extractions = Vec::new();

    for (i, arg) in fn_args.iter().enumerate() {
        if let FnArg::Typed(PatType { pat, ty, .. }) = arg {
            let arg_name = match **pat {
                syn::Pat::Ident(ref ident) => &ident.ident,
                _ => panic!("Unsupported pattern"),
            };

            let extract_code = match type_name(ty).as_str() {
                "f64" => quote! {
                    let #arg_name: f64 = match &args[#i] {
                        Value::Number(n) => *n,
                        _ => {
                            return Err(FunctionError::ArgumentType {
                                function: #fn_name_str.to_string(),
                                position: #i + 1,
                                expected: "number",
                            })
                        }
                    };
                },
                "String" => quote! {
                    let #arg_name: String = match &args[#i] {
                        Value::Text(s) => s.clone(),
                        _ => {
                            return Err(FunctionError::ArgumentType {
                                function: #fn_name_str.to_string(),
                                position: #i + 1,
                                expected: "text",
                            })
                        }
                    };
                },
                "&str" => quote! {
                    let #arg_name: &str = match &args[#i] {
                        Value::Text(s) => s.as_str(),
                        _ => {
                            return Err(FunctionError::ArgumentType {
                                function: #fn_name_str.to_string(),
                                position: #i + 1,
                                expected: "text",
                            })
                        }
                    };
                },
                other => panic!("Unsupported type {}", other),
            };

            arg_extractions.push(extract_code);
        }
    }

    let args_len = arg_extractions.len();
    let expanded = quote! {
        #(#fn_attrs)*
        #fn_vis fn #fn_name(args: &[Value]) #fn_output {
            if args.len() != #args_len {
                return Err(FunctionError::ArgumentCount {
                    function: #fn_name_str.to_string(),
                    expected: #args_len,
                    found: args.len(),
                });
            }

            #(#arg_extractions)*

            #fn_body
        }
    };

    TokenStream::from(expanded)
}
