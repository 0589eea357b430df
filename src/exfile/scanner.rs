/// Kinds of segment an EX buffer is made of
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Anything before the first field header or record (group/region name)
    GlobalHeader,
    /// Node field declarations
    FieldHeader,
    NodeRecord,
    /// A single ` Shape. Dimension=N, ...` line
    Shape { dimension: usize },
    /// Scale factor sets, local nodes and field declarations of the elements following a shape
    ElementHeader,
    ElementRecord,
}

/// A contiguous slice of the buffer; concatenating all segments yields the buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'b> {
    pub kind: SegmentKind,
    pub text: &'b str,
}

impl<'b> Segment<'b> {
    /// First integer after ` Element:` (the element identifier of a 2D record)
    pub fn element_identifier(&self) -> Option<usize> {
        match self.kind {
            SegmentKind::ElementRecord => self
                .text
                .trim_start()
                .strip_prefix("Element:")?
                .split_whitespace()
                .next()?
                .parse()
                .ok(),
            _ => None,
        }
    }

    /// The segment's first line without its line ending
    pub fn first_line(&self) -> &'b str {
        self.text.lines().next().unwrap_or("")
    }
}

/// Split a buffer into segments.
///
/// Every line either continues the current segment or opens a new one:
/// * ` Shape.` opens a shape, and the next line opens its element header
/// * ` Element:` opens an element record
/// * ` Node:` opens a node record (outside element headers)
/// * ` #Fields=` opens a field header (only in the node part of the buffer)
pub fn scan(buffer: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut kind = SegmentKind::GlobalHeader;
    let mut start = 0;
    let mut offset = 0;

    for line in buffer.split_inclusive('\n') {
        if let Some(next_kind) = opens_segment(line, kind) {
            if offset > start {
                segments.push(Segment {
                    kind,
                    text: &buffer[start..offset],
                });
            }
            kind = next_kind;
            start = offset;
        }
        offset += line.len();
    }

    if offset > start {
        segments.push(Segment {
            kind,
            text: &buffer[start..offset],
        });
    }

    segments
}

fn opens_segment(line: &str, current: SegmentKind) -> Option<SegmentKind> {
    if line.starts_with(" Element:") {
        return Some(SegmentKind::ElementRecord);
    }
    if line.starts_with(" Shape.") {
        return Some(SegmentKind::Shape {
            dimension: shape_dimension(line),
        });
    }

    match current {
        SegmentKind::Shape { .. } => Some(SegmentKind::ElementHeader),
        SegmentKind::ElementHeader => None,
        _ if line.starts_with(" Node:") => Some(SegmentKind::NodeRecord),
        SegmentKind::GlobalHeader | SegmentKind::NodeRecord if line.starts_with(" #Fields=") => {
            Some(SegmentKind::FieldHeader)
        }
        _ => None,
    }
}

fn shape_dimension(line: &str) -> usize {
    line.split_once("Dimension=")
        .map(|(_, rest)| {
            rest.chars()
                .take_while(|c| c.is_ascii_digit())
                .collect::<String>()
        })
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}
