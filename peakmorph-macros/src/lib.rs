use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{Expr, Lit, Token, UnOp, parse_macro_input};

/// Builds an array of `ControlPoint`s from `(index, amplitude)` literals,
/// checking the list at compile time.
///
/// This macro rejects lists that can never describe a shape: fewer than two
/// points, a first point other than `(0, 0.0)`, a last amplitude other than
/// zero, or indices that do not strictly increase. Whether the last index
/// matches the envelope size is only known at runtime and is checked by
/// `append_linear_shape`.
///
/// # Format
///
/// A comma-separated list of tuples `(index, amplitude)` where `index` is an
/// integer literal and `amplitude` a (possibly negative) numeric literal.
///
/// # Examples
///
/// ```ignore
/// use peakmorph::{shape, Interpolator};
///
/// let mut morph = Interpolator::new(100);
/// morph.append_linear_shape(&shape![(0, 0.0), (3, 1.0), (94, 0.0), (99, 0.0)], 3)?;
/// ```
#[proc_macro]
pub fn shape(input: TokenStream) -> TokenStream {
    let exprs = parse_macro_input!(input with Punctuated::<Expr, Token![,]>::parse_terminated);

    // Parse and check the points at compile time
    match parse_points(exprs.iter()).and_then(|points| check_points(&points).map(|()| points)) {
        Ok(points) => {
            let indices = points.iter().map(|(index, _)| *index);
            let amplitudes = points.iter().map(|(_, amplitude)| *amplitude);

            // Generate the code
            let expanded = quote! {
                [
                    #( ::peakmorph::ControlPoint::new(#indices, #amplitudes) ),*
                ]
            };

            TokenStream::from(expanded)
        }
        Err(e) => {
            let error_msg = format!("Invalid shape: {}", e);
            let expanded = quote! {
                compile_error!(#error_msg)
            };
            TokenStream::from(expanded)
        }
    }
}

fn parse_points<'a>(exprs: impl Iterator<Item = &'a Expr>) -> Result<Vec<(usize, f64)>, String> {
    exprs.map(parse_point).collect()
}

fn parse_point(expr: &Expr) -> Result<(usize, f64), String> {
    let Expr::Tuple(tuple) = expr else {
        return Err("expected an (index, amplitude) tuple".to_string());
    };
    let elems: Vec<&Expr> = tuple.elems.iter().collect();
    let [index, amplitude] = elems.as_slice() else {
        return Err(format!("expected 2 elements per point, got {}", elems.len()));
    };

    Ok((parse_index(index)?, parse_amplitude(amplitude)?))
}

fn parse_index(expr: &Expr) -> Result<usize, String> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(int) => int
                .base10_parse::<usize>()
                .map_err(|_| format!("invalid index '{}'", int)),
            _ => Err("index must be an integer literal".to_string()),
        },
        _ => Err("index must be an integer literal".to_string()),
    }
}

fn parse_amplitude(expr: &Expr) -> Result<f64, String> {
    match expr {
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => {
            parse_amplitude(&unary.expr).map(|value| -value)
        }
        Expr::Lit(lit) => match &lit.lit {
            Lit::Float(float) => float
                .base10_parse::<f64>()
                .map_err(|_| format!("invalid amplitude '{}'", float)),
            Lit::Int(int) => int
                .base10_parse::<f64>()
                .map_err(|_| format!("invalid amplitude '{}'", int)),
            _ => Err("amplitude must be a numeric literal".to_string()),
        },
        _ => Err("amplitude must be a numeric literal".to_string()),
    }
}

fn check_points(points: &[(usize, f64)]) -> Result<(), String> {
    let (first, last) = match points {
        [first, .., last] => (first, last),
        _ => return Err(format!("need at least 2 points, got {}", points.len())),
    };

    if *first != (0, 0.0) {
        return Err("first point must be (0, 0.0)".to_string());
    }
    if last.1 != 0.0 {
        return Err(format!("last point ({}, {}) must have zero amplitude", last.0, last.1));
    }
    if let Some(pair) = points.windows(2).find(|pair| pair[1].0 <= pair[0].0) {
        return Err(format!(
            "index {} does not come after index {}",
            pair[1].0, pair[0].0
        ));
    }

    Ok(())
}
