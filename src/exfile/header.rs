use crate::error::FormatError;

use ex_region::NodeValueLabel::{self, D2Ds1Ds2, DDs1, DDs2, Value, Zero};

/// How the EX element header describes an element's four local nodes.
///
/// Pole fan elements collapse local nodes 1 and 2 onto one pole cap node. Their headers replace
/// the cross derivative and one tangential derivative of those nodes with `zero`, and pick the
/// remaining derivative so the element edge follows the cap row. The elements on the far side
/// of the cap row traverse it backwards (`Reverse`), negating both derivatives there. Negation
/// uses the single scale factor `-1` appended to each such element record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderVariant {
    Normal,
    Reverse,
    Collapsed1,
    Collapsed2,
    Collapsed3,
    Collapsed4,
}

/// Value labels and scale factor indices of one local node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalNodeSpec {
    pub labels: [NodeValueLabel; 4],
    pub scale_factor_indices: [u8; 4],
}

const STANDARD: LocalNodeSpec = LocalNodeSpec {
    labels: [Value, DDs1, DDs2, D2Ds1Ds2],
    scale_factor_indices: [0, 0, 0, 0],
};

const NEGATED_TANGENTS: LocalNodeSpec = LocalNodeSpec {
    labels: [Value, DDs1, DDs2, D2Ds1Ds2],
    scale_factor_indices: [0, 1, 1, 0],
};

const fn collapsed(along: NodeValueLabel, negated: bool) -> LocalNodeSpec {
    LocalNodeSpec {
        labels: [Value, Zero, along, Zero],
        scale_factor_indices: [0, 0, if negated { 1 } else { 0 }, 0],
    }
}

impl HeaderVariant {
    /// Header variant of the element at `index` (0-based, in connectivity order)
    pub fn for_element(index: usize, elements_around: usize) -> Self {
        let half = elements_around / 2;
        match index {
            0 => Self::Collapsed1,
            i if i < half - 1 => Self::Normal,
            i if i == half - 1 => Self::Collapsed2,
            i if i == half => Self::Collapsed3,
            i if i < elements_around - 1 => Self::Reverse,
            i if i == elements_around - 1 => Self::Collapsed4,
            _ => Self::Normal,
        }
    }

    /// Local node descriptions, indexed by local node - 1
    pub fn local_nodes(&self) -> [LocalNodeSpec; 4] {
        match self {
            Self::Normal => [STANDARD; 4],
            Self::Reverse => [NEGATED_TANGENTS, NEGATED_TANGENTS, STANDARD, STANDARD],
            Self::Collapsed1 => [collapsed(DDs1, true), collapsed(DDs2, false), STANDARD, STANDARD],
            Self::Collapsed2 => [collapsed(DDs2, false), collapsed(DDs1, false), STANDARD, STANDARD],
            Self::Collapsed3 => [collapsed(DDs1, false), collapsed(DDs2, true), STANDARD, STANDARD],
            Self::Collapsed4 => [collapsed(DDs2, true), collapsed(DDs1, true), STANDARD, STANDARD],
        }
    }

    /// Whether elements with this header carry a scale factor set (and a `Scale factors:` record)
    pub fn declares_scale_factors(&self) -> bool {
        !matches!(self, Self::Normal)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Reverse => "reverse",
            Self::Collapsed1 => "collapsed1",
            Self::Collapsed2 => "collapsed2",
            Self::Collapsed3 => "collapsed3",
            Self::Collapsed4 => "collapsed4",
        }
    }
}

/// Line indices of one local node's entries within an element header
#[derive(Clone, Copy, Debug)]
struct LocalNodeLines {
    value_labels: usize,
    scale_factor_indices: usize,
}

/// The parsed field header of a 2D element block.
///
/// Only the scale factor set declaration and each component's local node value labels and
/// scale factor indices are understood; every other line is reproduced as-is.
#[derive(Clone, Debug)]
pub struct ElementHeader<'b> {
    lines: Vec<&'b str>,
    scale_factor_sets: usize,
    basis: String,
    local_nodes: Vec<[LocalNodeLines; 4]>,
}

const SCALE_FACTOR_SETS: &str = "#Scale factor sets=";
const VALUE_LABELS: &str = "Value labels:";
const SCALE_FACTOR_INDICES: &str = "Scale factor indices:";

impl<'b> ElementHeader<'b> {
    pub fn parse(text: &'b str) -> Result<Self, FormatError> {
        let lines: Vec<&'b str> = text.split_inclusive('\n').collect();

        let scale_factor_sets = lines
            .iter()
            .position(|line| line.trim() == format!("{}0", SCALE_FACTOR_SETS))
            .ok_or(FormatError::MissingScaleFactorSets)?;

        // (component name, basis, local node entries as [value labels, scale factor indices])
        let mut components: Vec<(String, String, Vec<[Option<usize>; 2]>)> = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let trimmed = line.trim();
            if let Some((name, rest)) = component_line(trimmed) {
                let basis = rest.split(',').next().unwrap_or("").trim().to_string();
                components.push((name.to_string(), basis, Vec::new()));
            } else if let Some((_, _, local_nodes)) = components.last_mut() {
                if is_local_node_line(trimmed) {
                    local_nodes.push([None, None]);
                } else if let Some(entry) = local_nodes.last_mut() {
                    if trimmed.starts_with(VALUE_LABELS) {
                        entry[0] = Some(idx);
                    } else if trimmed.starts_with(SCALE_FACTOR_INDICES) {
                        entry[1] = Some(idx);
                    }
                }
            }
        }

        if components.is_empty() {
            return Err(FormatError::NoComponents);
        }

        let mut local_nodes = Vec::with_capacity(components.len());
        for (name, basis, entries) in components.iter() {
            if basis.is_empty() {
                return Err(FormatError::MissingBasis(name.clone()));
            }
            if entries.len() != 4 {
                return Err(FormatError::LocalNodeCount {
                    component: name.clone(),
                    found: entries.len(),
                });
            }

            let mut component_nodes = [LocalNodeLines {
                value_labels: 0,
                scale_factor_indices: 0,
            }; 4];
            for (local_node, entry) in entries.iter().enumerate() {
                let missing = |line| FormatError::MissingNodeLine {
                    component: name.clone(),
                    local_node: local_node + 1,
                    line,
                };
                component_nodes[local_node] = LocalNodeLines {
                    value_labels: entry[0].ok_or_else(|| missing(VALUE_LABELS))?,
                    scale_factor_indices: entry[1].ok_or_else(|| missing(SCALE_FACTOR_INDICES))?,
                };
            }
            local_nodes.push(component_nodes);
        }

        Ok(Self {
            lines,
            scale_factor_sets,
            basis: components[0].1.clone(),
            local_nodes,
        })
    }

    /// Basis description of the first component, used to name the scale factor set
    pub fn basis(&self) -> &str {
        &self.basis
    }

    pub fn num_components(&self) -> usize {
        self.local_nodes.len()
    }

    /// The header text describing elements of the given variant
    pub fn render(&self, variant: HeaderVariant) -> String {
        if !variant.declares_scale_factors() {
            return self.lines.concat();
        }

        let specs = variant.local_nodes();
        let mut rewritten: Vec<Option<String>> = vec![None; self.lines.len()];

        for component_nodes in self.local_nodes.iter() {
            for (node_lines, spec) in component_nodes.iter().zip(specs.iter()) {
                let labels: Vec<String> = spec.labels.iter().map(|l| l.to_string()).collect();
                let indices: Vec<String> = spec
                    .scale_factor_indices
                    .iter()
                    .map(|i| i.to_string())
                    .collect();

                rewritten[node_lines.value_labels] = Some(replace_content(
                    self.lines[node_lines.value_labels],
                    &format!("{} {}", VALUE_LABELS, labels.join(" ")),
                ));
                rewritten[node_lines.scale_factor_indices] = Some(replace_content(
                    self.lines[node_lines.scale_factor_indices],
                    &format!("{} {}", SCALE_FACTOR_INDICES, indices.join(" ")),
                ));
            }
        }

        let sets_line = self.lines[self.scale_factor_sets];
        let (indent, _, eol) = split_line(sets_line);
        rewritten[self.scale_factor_sets] = Some(format!(
            "{indent}{SCALE_FACTOR_SETS}1{eol}{indent}  {}, #Scale factors=1{eol}",
            self.basis
        ));

        self.lines
            .iter()
            .zip(rewritten)
            .map(|(line, new_line)| new_line.unwrap_or_else(|| line.to_string()))
            .collect()
    }
}

/// `x.  c.Hermite*c.Hermite, no modify, standard node based.` => ("x", "c.Hermite*c.Hermite, ...")
fn component_line(trimmed: &str) -> Option<(&str, &str)> {
    if !trimmed.contains("node based") {
        return None;
    }
    let (name, rest) = trimmed.split_once('.')?;
    Some((name, rest.trim()))
}

/// `3. #Values=4`
fn is_local_node_line(trimmed: &str) -> bool {
    trimmed
        .split_once(". #Values=")
        .map(|(index, _)| !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

/// (leading whitespace, content, line ending)
fn split_line(line: &str) -> (&str, &str, &str) {
    let without_eol = line.trim_end_matches(['\r', '\n']);
    let content = without_eol.trim_start();
    let indent = &without_eol[..without_eol.len() - content.len()];
    (indent, content, &line[without_eol.len()..])
}

fn replace_content(line: &str, content: &str) -> String {
    let (indent, _, eol) = split_line(line);
    format!("{}{}{}", indent, content, eol)
}
