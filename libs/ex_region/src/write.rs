use super::field::{CoordinateField, NodeValueLabel, BICUBIC_HERMITE_BASIS};
use super::region::Region;

use std::fmt::Write;

/// Format a real the way the EX writer does: 15 decimal places with a signed, two digit exponent
///
/// ```
/// assert_eq!(ex_region::format_real(-0.25), "-2.500000000000000e-01");
/// ```
pub fn format_real(value: f64) -> String {
    let formatted = format!("{:.15e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

pub(crate) fn write_region(region: &Region, field: &CoordinateField) -> String {
    let mut buffer = String::new();

    // writing into a String cannot fail
    let _ = write_group(&mut buffer, region, field);
    buffer
}

fn write_group(w: &mut String, region: &Region, field: &CoordinateField) -> std::fmt::Result {
    writeln!(w, " Group name: {}", region.name)?;

    // nodes
    if !region.nodes.is_empty() {
        writeln!(w, " #Fields=1")?;
        writeln!(
            w,
            " 1) {}, coordinate, rectangular cartesian, #Components={}",
            field.name,
            field.num_components()
        )?;
        let derivative_names: Vec<String> = NodeValueLabel::HERMITE[1..]
            .iter()
            .map(|l| l.to_string())
            .collect();
        for (c, component) in field.component_names.iter().enumerate() {
            writeln!(
                w,
                "   {}.  Value index={}, #Derivatives={} ({}), #Versions=1",
                component,
                1 + c * NodeValueLabel::HERMITE.len(),
                derivative_names.len(),
                derivative_names.join(",")
            )?;
        }

        for (node_id, params) in region.nodes.iter() {
            writeln!(w, " Node: {}", node_id)?;
            for c in 0..field.num_components() {
                let values: Vec<String> = NodeValueLabel::HERMITE
                    .iter()
                    .map(|label| format_real(params.get(*label)[c]))
                    .collect();
                writeln!(w, "  {}", values.join(" "))?;
            }
        }
    }

    // line faces
    if !region.lines.is_empty() {
        writeln!(w, " Shape. Dimension=1, line")?;
        writeln!(w, " #Scale factor sets=0")?;
        writeln!(w, " #Nodes=0")?;
        writeln!(w, " #Fields=0")?;
        for line_id in 1..=region.lines.len() {
            writeln!(w, " Element: 0 0 {}", line_id)?;
        }
    }

    // square elements
    if !region.elements.is_empty() {
        writeln!(w, " Shape. Dimension=2, line*line")?;
        writeln!(w, " #Scale factor sets=0")?;
        writeln!(w, " #Nodes=4")?;
        writeln!(w, " #Fields=1")?;
        writeln!(
            w,
            " 1) {}, coordinate, rectangular cartesian, #Components={}",
            field.name,
            field.num_components()
        )?;
        let labels: Vec<String> = NodeValueLabel::HERMITE.iter().map(|l| l.to_string()).collect();
        for component in field.component_names.iter() {
            writeln!(
                w,
                "   {}.  {}, no modify, standard node based.",
                component, BICUBIC_HERMITE_BASIS
            )?;
            writeln!(w, "   #Nodes=4")?;
            for local_node in 1..=4 {
                writeln!(w, "   {}. #Values={}", local_node, labels.len())?;
                writeln!(w, "     Value labels: {}", labels.join(" "))?;
                writeln!(w, "     Scale factor indices: 0 0 0 0")?;
            }
        }

        for (element_id, element) in region.elements.iter() {
            writeln!(w, " Element: {} 0 0", element_id)?;
            if let Some(faces) = element.faces {
                writeln!(w, "   Faces:")?;
                for line_id in faces {
                    writeln!(w, "   0 0 {}", line_id)?;
                }
            }
            writeln!(w, "   Nodes:")?;
            writeln!(
                w,
                "   {} {} {} {}",
                element.nodes[0], element.nodes[1], element.nodes[2], element.nodes[3]
            )?;
        }
    }

    Ok(())
}
