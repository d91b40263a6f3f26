use svg::Document;
use svg::node::element::{Definitions, Group, Title, Use};

use crate::catalog::DieLineLookup;
use crate::entities::{Layout, PlacedDieLine};
use crate::io::svg::SvgDrawOptions;
use crate::io::svg::svg_util::{change_brightness, data_to_path, outline_data, rect_data};

pub fn layout_to_svg(layout: &Layout, options: SvgDrawOptions) -> Document {
    let sheet = &layout.sheet;
    let theme = options.theme.theme();

    let pad = 0.025 * f64::max(sheet.width, sheet.height);
    let vbox = (-pad, -pad, sheet.width + 2.0 * pad, sheet.height + 2.0 * pad);

    let stroke_width = f64::min(sheet.width, sheet.height) * 0.001 * theme.stroke_width_multiplier;

    //draw sheet
    let sheet_group = {
        let outer = sheet.outer_rect();
        let title = Title::new(format!(
            "sheet, id: {}, name: {}, material: {}, size: {}x{}",
            sheet.id, sheet.name, sheet.material, sheet.width, sheet.height
        ));
        Group::new()
            .set("id", format!("sheet_{}", sheet.id))
            .add(data_to_path(
                rect_data(&outer),
                &[
                    ("fill", theme.sheet_fill),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                ],
            ))
            .add(title)
    };

    let interior_group = match options.interior {
        false => None,
        true => {
            let interior = sheet.usable_interior();
            let stroke_color = change_brightness(theme.sheet_fill, 0.5);
            let group = Group::new().set("id", "interior").add(
                data_to_path(
                    rect_data(&interior),
                    &[
                        ("fill", "none"),
                        ("stroke", &*stroke_color),
                        ("stroke-width", &*format!("{stroke_width}")),
                        ("stroke-opacity", &*format!("{}", theme.interior_stroke_opac)),
                        ("stroke-dasharray", &*format!("{}", 5.0 * stroke_width)),
                        ("stroke-linecap", "round"),
                        ("stroke-linejoin", "round"),
                    ],
                )
                .add(Title::new(format!(
                    "usable interior, [x_min: {:.3}, y_min: {:.3}, x_max: {:.3}, y_max: {:.3}]",
                    interior.x_min, interior.y_min, interior.x_max, interior.y_max
                ))),
            );
            Some(group)
        }
    };

    //draw die lines
    let die_lines_group = {
        //define every die line once, in its local coordinates
        let defs = layout.die_lines().fold(Definitions::new(), |defs, dl| {
            defs.add(
                Group::new().set("id", format!("die_line_{}", dl.id)).add(data_to_path(
                    outline_data(&dl.outline),
                    &[
                        ("fill", theme.die_line_fill),
                        ("stroke-width", &*format!("{stroke_width}")),
                        ("fill-rule", "nonzero"),
                        ("stroke", "black"),
                        ("opacity", "0.9"),
                    ],
                )),
            )
        });

        layout
            .placements()
            .iter()
            .filter_map(|p| layout.die_line(p.die_line_id).map(|dl| (p, (dl.width, dl.height))))
            .fold(Group::new().set("id", "die_lines").add(defs), |group, (p, (w, h))| {
                let title = Title::new(format!(
                    "placement, id: {}, die line: {}, position: ({:.3}, {:.3}), rotation: {}",
                    p.id, p.die_line_id, p.x, p.y, p.rotation
                ));
                group.add(
                    Use::new()
                        .set("transform", placement_to_svg_transform(p, w, h))
                        .set("xlink:href", format!("#die_line_{}", p.die_line_id))
                        .add(title),
                )
            })
    };

    let bbox_group = match options.bounding_boxes {
        false => None,
        true => {
            let group = layout
                .placements()
                .iter()
                .filter_map(|p| layout.placed_shape(p))
                .fold(Group::new().set("id", "bounding_boxes"), |group, shape| {
                    group.add(data_to_path(
                        rect_data(&shape.bbox),
                        &[
                            ("fill", "none"),
                            ("stroke", "black"),
                            ("stroke-width", &*format!("{}", 0.5 * stroke_width)),
                            ("stroke-dasharray", &*format!("{}", 2.0 * stroke_width)),
                        ],
                    ))
                });
            Some(group)
        }
    };

    let optionals = [interior_group, bbox_group]
        .into_iter()
        .flatten()
        .fold(Group::new().set("id", "optionals"), |g, opt| g.add(opt));

    Document::new()
        .set("viewBox", vbox)
        .set("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .add(sheet_group)
        .add(die_lines_group)
        .add(optionals)
}

/// Rotates the die line about the center of its nominal `w`×`h` box,
/// then moves the min corner of the rotated box to the placement's position.
fn placement_to_svg_transform(p: &PlacedDieLine, w: f64, h: f64) -> String {
    //operations are effectively applied from right to left
    let (fw, fh) = match p.rotation.swaps_axes() {
        true => (h, w),
        false => (w, h),
    };
    let (cx, cy) = (p.x + fw / 2.0, p.y + fh / 2.0);
    let r = p.rotation.degrees();
    format!(
        "translate({cx} {cy}) rotate({r}) translate({} {})",
        -w / 2.0,
        -h / 2.0
    )
}
