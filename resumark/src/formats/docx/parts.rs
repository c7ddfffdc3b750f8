//! The fixed parts of the package: content types, relationships, styles, numbering.

use super::document::{ListInstance, FIRST_LINK_RELATIONSHIP, MAX_LEVEL};
use crate::formats::common::{NESTED_BULLET, TOP_BULLET};
use crate::style::resolver::{LINE_SPACING, LIST_HANGING, LIST_INDENT};
use crate::style::{document_defaults, Color};
use quick_xml::escape::escape;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const MAIN_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const RELATIONSHIP_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
    r#"<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>"#,
    r#"</Types>"#
);

pub const PACKAGE_RELATIONSHIPS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#
);

/// `word/_rels/document.xml.rels`: styles, numbering, then one entry per hyperlink.
pub fn document_relationships(hyperlinks: &[String]) -> String {
    let mut xml = format!("{XML_DECLARATION}<Relationships xmlns=\"{RELATIONSHIPS_NS}\">");
    xml.push_str(&format!(
        r#"<Relationship Id="rId1" Type="{RELATIONSHIP_TYPE}/styles" Target="styles.xml"/>"#
    ));
    xml.push_str(&format!(
        r#"<Relationship Id="rId2" Type="{RELATIONSHIP_TYPE}/numbering" Target="numbering.xml"/>"#
    ));
    for (index, target) in hyperlinks.iter().enumerate() {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{RELATIONSHIP_TYPE}/hyperlink" Target="{}" TargetMode="External"/>"#,
            FIRST_LINK_RELATIONSHIP + index,
            escape(target.as_str())
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// `word/styles.xml`: document defaults from the style system plus outline headings.
pub fn styles() -> String {
    let defaults = document_defaults();
    let font = defaults.font.name();
    let mut xml = format!("{XML_DECLARATION}<w:styles xmlns:w=\"{MAIN_NS}\">");
    xml.push_str(&format!(
        concat!(
            "<w:docDefaults><w:rPrDefault><w:rPr>",
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#,
            r#"<w:color w:val="{color}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#,
            "</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>",
            r#"<w:spacing w:after="0" w:line="{line}" w:lineRule="auto"/>"#,
            "</w:pPr></w:pPrDefault></w:docDefaults>"
        ),
        font = font,
        color = defaults.color.hex(),
        size = defaults.size,
        line = LINE_SPACING,
    ));
    xml.push_str(concat!(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#,
        r#"<w:name w:val="Normal"/><w:qFormat/></w:style>"#
    ));
    for level in 1..=6 {
        xml.push_str(&format!(
            concat!(
                r#"<w:style w:type="paragraph" w:styleId="Heading{level}">"#,
                r#"<w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/>"#,
                r#"<w:next w:val="Normal"/><w:qFormat/>"#,
                r#"<w:pPr><w:keepNext/><w:outlineLvl w:val="{outline}"/></w:pPr>"#,
                r#"<w:rPr><w:b/><w:color w:val="{color}"/></w:rPr></w:style>"#
            ),
            level = level,
            outline = level - 1,
            color = Color::Ink.hex(),
        ));
    }
    xml.push_str("</w:styles>");
    xml
}

const BULLET_LIST: usize = 0;
const DECIMAL_LIST: usize = 1;

/// `word/numbering.xml`: one bullet and one decimal definition, one instance per list.
pub fn numbering(lists: &[ListInstance]) -> String {
    let mut xml = format!("{XML_DECLARATION}<w:numbering xmlns:w=\"{MAIN_NS}\">");
    xml.push_str(&abstract_definition(BULLET_LIST, false));
    xml.push_str(&abstract_definition(DECIMAL_LIST, true));
    for list in lists {
        let abstract_id = if list.ordered {
            DECIMAL_LIST
        } else {
            BULLET_LIST
        };
        xml.push_str(&format!(
            concat!(
                r#"<w:num w:numId="{num}"><w:abstractNumId w:val="{abstract_id}"/>"#,
                r#"<w:lvlOverride w:ilvl="0"><w:startOverride w:val="1"/></w:lvlOverride>"#,
                "</w:num>"
            ),
            num = list.num_id,
            abstract_id = abstract_id,
        ));
    }
    xml.push_str("</w:numbering>");
    xml
}

fn abstract_definition(id: usize, ordered: bool) -> String {
    let mut xml = format!(
        r#"<w:abstractNum w:abstractNumId="{id}"><w:multiLevelType w:val="hybridMultilevel"/>"#
    );
    for level in 0..=MAX_LEVEL {
        let (format, text) = if ordered {
            ("decimal", format!("%{}.", level + 1))
        } else if level == 0 {
            ("bullet", TOP_BULLET.to_string())
        } else {
            ("bullet", NESTED_BULLET.to_string())
        };
        let indent = LIST_INDENT * (level as u32 + 1);
        xml.push_str(&format!(
            concat!(
                r#"<w:lvl w:ilvl="{level}"><w:start w:val="1"/><w:numFmt w:val="{format}"/>"#,
                r#"<w:lvlText w:val="{text}"/><w:lvlJc w:val="left"/>"#,
                r#"<w:pPr><w:ind w:left="{indent}" w:hanging="{hanging}"/></w:pPr>"#,
                r#"<w:rPr><w:b/><w:color w:val="{color}"/></w:rPr></w:lvl>"#
            ),
            level = level,
            format = format,
            text = text,
            indent = indent,
            hanging = LIST_HANGING,
            color = Color::Accent.hex(),
        ));
    }
    xml.push_str("</w:abstractNum>");
    xml
}
