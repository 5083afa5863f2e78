//! Text renderings of a [`TransformMatrix`] for CSS and SVG consumers.

use crate::matrix::TransformMatrix;

/// CSS `matrix3d(...)`: the transform embedded in a column-major 4×4 with the
/// z axis passed through unchanged.
pub fn css_matrix3d(t: &TransformMatrix) -> String {
    format!(
        "matrix3d({},{},0,{},{},{},0,{},0,0,1,0,{},{},0,{})",
        t.a, t.d, t.g, t.b, t.e, t.h, t.c, t.f, t.i
    )
}

/// SVG `matrix(a d b e c f)`. SVG has no perspective terms; `g`, `h` and
/// `i` are ignored, so only affine matrices render faithfully.
pub fn svg_matrix(t: &TransformMatrix) -> String {
    format!("matrix({} {} {} {} {} {})", t.a, t.d, t.b, t.e, t.c, t.f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_strings() {
        let t = TransformMatrix::IDENTITY;
        assert_eq!(css_matrix3d(&t), "matrix3d(1,0,0,0,0,1,0,0,0,0,1,0,0,0,0,1)");
        assert_eq!(svg_matrix(&t), "matrix(1 0 0 1 0 0)");
    }

    #[test]
    fn css_is_column_major() {
        let t = TransformMatrix::from_params([2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 0.5, 0.25]);
        assert_eq!(
            css_matrix3d(&t),
            "matrix3d(2,5,0,0.5,3,6,0,0.25,0,0,1,0,4,7,0,1)"
        );
        assert_eq!(svg_matrix(&t), "matrix(2 5 3 6 4 7)");
    }
}
