//! Text mirror of the reward record.
//!
//! A tree-structured, human-editable rendition of the same logical record
//! the binary codec in [`crate::reward`] handles. Enumerations appear under
//! their symbolic names here; the binary form never needs the name tables.
//! Emission goes through quick-xml events, parsing through a roxmltree
//! document walk. Neither side leaks its shape into the binary layout.

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use roxmltree::{Document, Node};

use crate::enums::{
    FinishResult, GameItemCategory, GameItemType, RewardEntryPresentType, RewardPresentType,
};
use crate::reward::{EventPresent, Reward, TunedCarEntry};
use crate::{Error, Result};

/// Serializes a reward to its text mirror (indented, root `<reward>`).
pub fn to_xml(reward: &Reward) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_reward(&mut writer, reward)?;
    String::from_utf8(writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))
}

/// Parses a reward from its text mirror.
pub fn from_xml(text: &str) -> Result<Reward> {
    let doc = Document::parse(text).map_err(|e| Error::Xml(e.to_string()))?;
    parse_reward(doc.root_element())
}

// ============================================================================
// Emission
// ============================================================================

fn emit<W: std::io::Write>(writer: &mut Writer<W>, event: Event) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Xml(e.to_string()))
}

fn start<W: std::io::Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))
}

fn end<W: std::io::Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    emit(writer, Event::End(BytesEnd::new(name)))
}

/// Writes `<name value="..."/>`, the scalar convention of the format.
fn value_elem<W: std::io::Write>(writer: &mut Writer<W>, name: &str, value: &str) -> Result<()> {
    let mut elem = BytesStart::new(name);
    elem.push_attribute(("value", value));
    emit(writer, Event::Empty(elem))
}

fn write_item<W: std::io::Write>(writer: &mut Writer<W>, present: &EventPresent) -> Result<()> {
    let mut elem = BytesStart::new("item");
    elem.push_attribute(("type_id", GameItemType::label(present.type_id).as_str()));
    elem.push_attribute((
        "category_id",
        GameItemCategory::label(present.category_id).as_str(),
    ));
    elem.push_attribute(("argument1", present.args[0].to_string().as_str()));
    elem.push_attribute(("argument2", present.args[1].to_string().as_str()));
    elem.push_attribute(("argument3", present.args[2].to_string().as_str()));
    elem.push_attribute(("argument4", present.args[3].to_string().as_str()));
    elem.push_attribute(("f_name", present.f_name.as_str()));
    emit(writer, Event::Empty(elem))
}

fn write_present_list<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    list: &[EventPresent],
) -> Result<()> {
    if list.is_empty() {
        return Ok(());
    }
    start(writer, name)?;
    for present in list {
        write_item(writer, present)?;
    }
    end(writer, name)
}

fn write_reward<W: std::io::Write>(writer: &mut Writer<W>, reward: &Reward) -> Result<()> {
    start(writer, "reward")?;

    start(writer, "point_table")?;
    for &point in &reward.point_table {
        value_elem(writer, "point", &point.to_string())?;
    }
    end(writer, "point_table")?;

    start(writer, "prize_table")?;
    for &prize in &reward.prize_table {
        value_elem(writer, "prize", &prize.to_string())?;
    }
    end(writer, "prize_table")?;

    start(writer, "star_table")?;
    for &star in &reward.star_table {
        value_elem(writer, "star", &FinishResult::label(star))?;
    }
    end(writer, "star_table")?;

    write_present_list(writer, "present", &reward.presents)?;

    value_elem(
        writer,
        "special_reward_code",
        &reward.special_reward_code.to_string(),
    )?;
    value_elem(writer, "prize_type", bool_str(reward.prize_cumulative))?;
    value_elem(writer, "pp_base", &reward.pp_base.to_string())?;
    value_elem(
        writer,
        "percent_at_pp100",
        &reward.percent_at_pp100.to_string(),
    )?;
    value_elem(writer, "is_once", bool_str(reward.is_once))?;
    value_elem(writer, "present_type", reward.present_type.as_str())?;

    write_present_list(writer, "entry_present", &reward.entry_presents)?;

    value_elem(
        writer,
        "entry_present_type",
        reward.entry_present_type.as_str(),
    )?;

    if let Some(tuned) = &reward.tuned_entry {
        start(writer, "entry_base")?;
        value_elem(writer, "car_label", &tuned.car_label)?;
        value_elem(writer, "driver_name", &tuned.driver_name)?;
        value_elem(writer, "driver_region", &tuned.driver_region)?;
        end(writer, "entry_base")?;
    }

    end(writer, "reward")
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

// ============================================================================
// Parsing
// ============================================================================

fn value_str<'a>(node: Node<'a, '_>) -> Result<&'a str> {
    node.attribute("value")
        .or_else(|| node.text().map(str::trim))
        .ok_or_else(|| Error::Xml(format!("node '{}' has no value", node.tag_name().name())))
}

fn value_i32(node: Node) -> Result<i32> {
    let s = value_str(node)?;
    s.parse()
        .map_err(|_| Error::Xml(format!("'{s}' is not a 32-bit integer")))
}

fn value_i16(node: Node) -> Result<i16> {
    let s = value_str(node)?;
    s.parse()
        .map_err(|_| Error::Xml(format!("'{s}' is not a 16-bit integer")))
}

fn value_bool(node: Node) -> Result<bool> {
    match value_str(node)? {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::Xml(format!("'{other}' is not a boolean"))),
    }
}

/// Star entries accept the symbolic ladder name or a raw numeric code.
fn parse_star(node: Node) -> Result<i32> {
    let s = value_str(node)?;
    if let Some(result) = FinishResult::from_name(s) {
        return Ok(result.code());
    }
    s.parse().map_err(|_| Error::UnknownEnumName {
        kind: "finish result",
        name: s.to_string(),
    })
}

fn parse_item(node: Node) -> Result<EventPresent> {
    // Fehlende Attribute behalten ihre Defaults (insbesondere argument4 = -1).
    let mut present = EventPresent::default();
    for attr in node.attributes() {
        let value = attr.value();
        match attr.name() {
            "type_id" => {
                present.type_id = match GameItemType::from_name(value) {
                    Some(t) => t.code(),
                    None => value.parse().map_err(|_| Error::UnknownEnumName {
                        kind: "item type",
                        name: value.to_string(),
                    })?,
                };
            }
            "category_id" => {
                present.category_id = match GameItemCategory::from_name(value) {
                    Some(c) => c.code(),
                    None => value.parse().map_err(|_| Error::UnknownEnumName {
                        kind: "item category",
                        name: value.to_string(),
                    })?,
                };
            }
            "argument1" => present.args[0] = parse_arg(value)?,
            "argument2" => present.args[1] = parse_arg(value)?,
            "argument3" => present.args[2] = parse_arg(value)?,
            "argument4" => present.args[3] = parse_arg(value)?,
            "f_name" => present.f_name = value.to_string(),
            _ => {}
        }
    }
    Ok(present)
}

fn parse_arg(value: &str) -> Result<i32> {
    value
        .parse()
        .map_err(|_| Error::Xml(format!("'{value}' is not a 32-bit integer")))
}

fn parse_items(node: Node, out: &mut Vec<EventPresent>) -> Result<()> {
    for item in node
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "item")
    {
        out.push(parse_item(item)?);
    }
    Ok(())
}

fn parse_tuned(node: Node) -> Result<TunedCarEntry> {
    let mut tuned = TunedCarEntry::default();
    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "car_label" => tuned.car_label = value_str(child)?.to_string(),
            "driver_name" => tuned.driver_name = value_str(child)?.to_string(),
            "driver_region" => tuned.driver_region = value_str(child)?.to_string(),
            _ => {}
        }
    }
    Ok(tuned)
}

fn parse_reward(root: Node) -> Result<Reward> {
    let mut reward = Reward::default();
    for node in root.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "point_table" => {
                for point in node
                    .children()
                    .filter(|n| n.is_element() && n.tag_name().name() == "point")
                {
                    reward.point_table.push(value_i32(point)?);
                }
            }
            "prize_table" => {
                for prize in node
                    .children()
                    .filter(|n| n.is_element() && n.tag_name().name() == "prize")
                {
                    reward.prize_table.push(value_i32(prize)?);
                }
            }
            "star_table" => {
                for star in node
                    .children()
                    .filter(|n| n.is_element() && n.tag_name().name() == "star")
                {
                    reward.star_table.push(parse_star(star)?);
                }
            }
            // Die beiden Listen sind getrennt; jede liest nur ihren Knoten.
            "present" => parse_items(node, &mut reward.presents)?,
            "entry_present" => parse_items(node, &mut reward.entry_presents)?,
            "special_reward_code" => reward.special_reward_code = value_i32(node)?,
            "prize_type" => reward.prize_cumulative = value_bool(node)?,
            "pp_base" => reward.pp_base = value_i16(node)?,
            "percent_at_pp100" => reward.percent_at_pp100 = value_i16(node)?,
            "is_once" => reward.is_once = value_bool(node)?,
            "present_type" => {
                let s = value_str(node)?;
                reward.present_type =
                    RewardPresentType::from_name(s).ok_or_else(|| Error::UnknownEnumName {
                        kind: "present ordering",
                        name: s.to_string(),
                    })?;
            }
            "entry_present_type" => {
                let s = value_str(node)?;
                reward.entry_present_type = RewardEntryPresentType::from_name(s).ok_or_else(
                    || Error::UnknownEnumName {
                        kind: "entry present ordering",
                        name: s.to_string(),
                    },
                )?;
            }
            "entry_base" => reward.tuned_entry = Some(parse_tuned(node)?),
            _ => {}
        }
    }
    Ok(reward)
}
