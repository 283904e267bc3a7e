// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

use crate::provider::FaceId;
use crate::{Alignment, ErrorKind, FontStyle, MAX_BORDER_THICKNESS};

use super::utils::{assert_eq_glyphs, chars, positions, TestEnv};

fn error_kind(env: &mut TestEnv, markup: &str) -> ErrorKind {
    env.markup_layout(markup).unwrap_err().kind()
}

#[test]
fn bold_run_followed_by_plain_text() {
    let mut env = TestEnv::new();
    let (layout, alignment) = env.markup_layout("<p><b>A</b>B</p>").unwrap();
    let glyphs = layout.glyphs();

    assert_eq!(alignment, None);
    assert_eq!(chars(glyphs), "AB");
    assert_eq!(glyphs[0].face, Some(env.provider().face("Box", FontStyle::Bold)));
    assert_eq!(glyphs[1].face, Some(env.provider().face("Box", FontStyle::Normal)));
    assert_eq!(glyphs[0].advance, 9);
    assert_eq!(glyphs[1].x, 9);
}

#[test]
fn nested_styles_combine_and_restore() {
    let mut env = TestEnv::new();
    let (layout, _) = env
        .markup_layout("<p><b>a<i>b</i></b>c<i>d</i></p>")
        .unwrap();

    let faces: Vec<_> = layout.glyphs().iter().map(|glyph| glyph.face).collect();
    assert_eq!(
        faces,
        [
            Some(FaceId(2)),
            Some(FaceId(3)),
            Some(FaceId(0)),
            Some(FaceId(1)),
        ]
    );

    let (layout, _) = env
        .markup_layout(r#"<p style="italic"><b>x</b></p>"#)
        .unwrap();
    assert_eq!(layout.glyphs()[0].face, Some(FaceId(3)));
}

#[test]
fn plain_markup_matches_plain_text() {
    let mut env = TestEnv::new();
    let (mut from_markup, _) = env.markup_layout("<p>one two</p>").unwrap();
    from_markup
        .finalize(env.control.cropping, env.control.width)
        .unwrap();
    let from_text = env.finalized("one two");
    assert_eq_glyphs(from_markup.glyphs(), from_text.glyphs(), "plain");

    assert_eq!(env.markup("<p>Hi</p>"), env.plain("Hi"));
}

#[test]
fn span_attributes() {
    let mut env = TestEnv::new();
    let (layout, _) = env
        .markup_layout(
            r##"<p><span font="Other" size="32" color="#FF0000" border="2" border_color="#00FF00" highlight_color="#0000FF">x</span>y</p>"##,
        )
        .unwrap();
    let [x, y] = layout.glyphs() else {
        panic!("expected two glyphs");
    };

    assert_eq!(x.face, Some(FaceId(4)));
    assert_eq!(x.pixel_size, 32);
    assert_eq!(x.advance, 16);
    assert_eq!(x.text_color, Color::from_rgb8(255, 0, 0));
    assert_eq!(x.border_thickness, 2);
    assert_eq!(x.border_color, Color::from_rgb8(0, 255, 0));
    assert!(x.highlight);
    assert_eq!(x.highlight_color, Color::from_rgb8(0, 0, 255));

    assert_eq!(y.face, Some(FaceId(0)));
    assert_eq!(y.pixel_size, 16);
    assert_eq!(y.text_color, Color::WHITE);
    assert_eq!(y.border_thickness, 0);
    assert!(!y.highlight);
}

#[test]
fn visibility_sets_alpha() {
    let mut env = TestEnv::new();
    let (layout, _) = env
        .markup_layout(r##"<p visibility="0.5"><span color="#00FF00">x</span></p>"##)
        .unwrap();
    let glyph = &layout.glyphs()[0];

    assert_eq!(glyph.text_color, Color::from_rgb8(0, 255, 0).with_alpha(0.5));
    assert_eq!(glyph.border_color.components[3], 0.5);
}

#[test]
fn line_breaks() {
    let mut env = TestEnv::new();
    let (mut layout, _) = env.markup_layout("<p>a<br/>b</p>").unwrap();
    layout.finalize(env.control.cropping, 0).unwrap();
    assert_eq!(positions(layout.glyphs()), [(0, -16), (0, -36)]);

    let (mut layout, _) = env.markup_layout("<p>a<br/><br/>b</p>").unwrap();
    layout.finalize(env.control.cropping, 0).unwrap();
    assert_eq!(positions(layout.glyphs()), [(0, -16), (0, -56)]);
}

#[test]
fn br_breaks_even_when_collapsing() {
    let mut env = TestEnv::new();
    env.control.collapse_whitespace = true;
    let (mut layout, _) = env.markup_layout("<p>a\n<br/>b</p>").unwrap();
    layout.finalize(env.control.cropping, 0).unwrap();

    assert_eq!(chars(layout.glyphs()), "a b");
    assert_eq!(positions(layout.glyphs()), [(0, -16), (8, -16), (0, -36)]);
}

#[test]
fn comments_and_entities() {
    let mut env = TestEnv::new();
    let (layout, _) = env
        .markup_layout("<p>a<!-- note -->b&amp;c</p>")
        .unwrap();
    assert_eq!(chars(layout.glyphs()), "ab&c");
}

#[test]
fn root_alignment() {
    let mut env = TestEnv::new();
    let (_, alignment) = env.markup_layout(r#"<p align="right">x</p>"#).unwrap();
    assert_eq!(alignment, Some(Alignment::Right));

    env.control.width = 40;
    let image = env.markup(r#"<p align="center">ab</p>"#).unwrap();
    assert_eq!(image.x0, 12);
}

#[test]
fn unknown_tags() {
    let mut env = TestEnv::new();
    for markup in [
        "<p><bad>x</bad></p>",
        "<span>x</span>",
        "<p><p>x</p></p>",
        "<p><b><u>x</u></b></p>",
    ] {
        assert_eq!(error_kind(&mut env, markup), ErrorKind::UnknownTag, "{markup}");
    }
}

#[test]
fn invalid_attributes() {
    let mut env = TestEnv::new();
    for markup in [
        r#"<p><span weight="3">x</span></p>"#,
        r#"<p><b x="1">y</b></p>"#,
        r#"<p><span align="left">x</span></p>"#,
        r#"<p>a<br clear="all"/></p>"#,
        r#"<p size="-1">x</p>"#,
        r#"<p size="big">x</p>"#,
        r#"<p color="red">x</p>"#,
        r##"<p color="#FF00">x</p>"##,
        r#"<p border="-2">x</p>"#,
        r#"<p border="2147483647">x</p>"#,
        r#"<p border="257">x</p>"#,
        r#"<p visibility="1.5">x</p>"#,
        r#"<p style="heavy">x</p>"#,
        r#"<p align="justify">x</p>"#,
    ] {
        assert_eq!(
            error_kind(&mut env, markup),
            ErrorKind::InvalidAttribute,
            "{markup}"
        );
    }
}

#[test]
fn border_up_to_the_maximum() {
    let mut env = TestEnv::new();
    let (layout, _) = env
        .markup_layout(&format!(r#"<p border="{MAX_BORDER_THICKNESS}">x</p>"#))
        .unwrap();
    assert_eq!(
        layout.glyphs()[0].border_thickness,
        i32::try_from(MAX_BORDER_THICKNESS).unwrap()
    );
}

#[test]
fn structure_errors() {
    let mut env = TestEnv::new();
    assert_eq!(
        error_kind(&mut env, "<p>a<br>b</br></p>"),
        ErrorKind::MarkupSyntaxError
    );

    let err = env.markup("<p>unclosed").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MarkupSyntaxError);
    assert_eq!(err.code(), 8);
}

#[test]
fn provider_errors_surface() {
    let mut env = TestEnv::new();
    assert_eq!(
        error_kind(&mut env, r#"<p><span font="Nope">x</span></p>"#),
        ErrorKind::FaceNotFound
    );
}
