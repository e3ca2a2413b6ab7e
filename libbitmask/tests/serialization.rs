use libbitmask::{BitGridMask, DocumentError, DrawMode, Element, Error, Rect, DOCUMENT_ROOT};
use mktemp::Temp;

mod common;
use common::{check_storage, random_mask, rng};

fn round_trip(mask: &BitGridMask) -> anyhow::Result<BitGridMask> {
    let text = mask.to_xml_string(DOCUMENT_ROOT);
    Ok(BitGridMask::from_xml_str(&text)?)
}

/// A hand written document holding a single 32 pixel row
fn single_word(bounding_box: &str, payload: &str) -> Element {
    let mut root = Element::new(DOCUMENT_ROOT);
    root.set_attribute("outside", "false");
    root.add_child(Element::with_text("rectangle", "0 0 31 0"));
    root.add_child(Element::with_text("boundingBox", bounding_box));
    root.add_child(Element::with_text("size", "1 1 1"));
    root.add_child(Element::with_text("mask", payload));
    root
}

#[test]
fn random_masks_round_trip() -> anyhow::Result<()> {
    let mut rng = rng();
    for i in 0..20 {
        let mut mask = random_mask(&mut rng, Rect::new(-100, -50, 200, 80));
        if i % 3 == 0 {
            mask.invert();
        }
        let restored = round_trip(&mask)?;
        assert!(mask.compare(&restored));
        assert_eq!(restored.count(), mask.count());
        assert_eq!(restored.bounding_box(), mask.bounding_box());
        assert_eq!(restored.storage_rect(), mask.storage_rect());
        assert_eq!(restored.is_outside_selected(), mask.is_outside_selected());
    }
    Ok(())
}

#[test]
fn masks_without_storage_round_trip() -> anyhow::Result<()> {
    let empty = BitGridMask::new();
    assert_eq!(round_trip(&empty)?, empty);

    let mut everything = BitGridMask::new();
    everything.invert();
    let restored = round_trip(&everything)?;
    assert!(restored.is_full());
    assert_eq!(restored.storage_rect(), None);
    Ok(())
}

#[test]
fn document_layout() -> anyhow::Result<()> {
    let mask = BitGridMask::filled((0, 0, 40, 2))?;
    let mut root = Element::new("aoi");
    root.set_attribute("name", "harbour");
    root.add_child(Element::with_text("label", "north & south"));
    mask.to_xml(&mut root);

    assert_eq!(root.attribute("outside"), Some("false"));
    assert_eq!(root.child("rectangle").map(Element::text).as_deref(), Some("0 0 63 2"));
    assert_eq!(root.child("boundingBox").map(Element::text).as_deref(), Some("0 0 40 2"));
    assert_eq!(root.child("size").map(Element::text).as_deref(), Some("2 3 123"));
    let ecc = root.attribute("ecc").unwrap();
    assert!(ecc.starts_with("ccitt:"));
    assert_eq!(ecc.len(), "ccitt:".len() + 4);

    // the caller's own content survives alongside the mask
    let parsed: Element = root.to_string().parse()?;
    assert_eq!(parsed.attribute("name"), Some("harbour"));
    assert_eq!(parsed.child("label").unwrap().text(), "north & south");
    assert_eq!(BitGridMask::from_xml(&parsed)?, mask);
    Ok(())
}

#[test]
fn corrupted_payload_is_detected() -> anyhow::Result<()> {
    let mut mask = BitGridMask::new();
    mask.set_region((3, 3, 90, 20), DrawMode::Draw)?;
    mask.set_region((10, 5, 12, 6), DrawMode::Erase)?;
    let text = mask.to_xml_string(DOCUMENT_ROOT);

    let start = text.find("<mask>").unwrap() + "<mask>".len();
    let end = text.find("</mask>").unwrap();
    let middle = start + (end - start) / 2;
    let original = &text[middle..=middle];
    let replacement = if original == "A" { "B" } else { "A" };
    let corrupted = format!("{}{replacement}{}", &text[..middle], &text[middle + 1..]);

    match BitGridMask::from_xml_str(&corrupted) {
        Err(Error::ChecksumMismatch { expected, actual }) => assert_ne!(expected, actual),
        other => panic!("expected a checksum mismatch, got {other:?}"),
    }
    Ok(())
}

#[test]
fn stored_count_is_recomputed() -> anyhow::Result<()> {
    let mask = BitGridMask::filled((0, 0, 40, 2))?;
    let text = mask
        .to_xml_string(DOCUMENT_ROOT)
        .replace("<size>2 3 123</size>", "<size>2 3 7</size>");
    let restored = BitGridMask::from_xml_str(&text)?;
    assert_eq!(restored.count(), 123);
    Ok(())
}

#[test]
fn inconsistent_sizes_are_rejected() -> anyhow::Result<()> {
    let text = BitGridMask::filled((0, 0, 40, 2))?.to_xml_string(DOCUMENT_ROOT);

    let wide = text.replace("<size>2 3 123</size>", "<size>3 3 123</size>");
    assert!(matches!(
        BitGridMask::from_xml_str(&wide),
        Err(Error::MalformedDocument(DocumentError::InconsistentSize { .. }))
    ));

    let unaligned = text.replace("<rectangle>0 0 63 2</rectangle>", "<rectangle>1 0 63 2</rectangle>");
    assert!(matches!(
        BitGridMask::from_xml_str(&unaligned),
        Err(Error::MalformedDocument(DocumentError::InconsistentSize { .. }))
    ));

    let escaped = text.replace("<boundingBox>0 0 40 2</boundingBox>", "<boundingBox>0 0 80 2</boundingBox>");
    assert!(matches!(
        BitGridMask::from_xml_str(&escaped),
        Err(Error::MalformedDocument(DocumentError::BoundingBoxOutsideStorage { .. }))
    ));

    let long = single_word("0 0 0 0", "AAAAAAAAAAA=");
    assert!(matches!(
        BitGridMask::from_xml(&long),
        Err(Error::MalformedDocument(DocumentError::PayloadLength {
            expected: 4,
            actual: 8
        }))
    ));
    Ok(())
}

#[test]
fn missing_parts_are_rejected() -> anyhow::Result<()> {
    let text = BitGridMask::filled((0, 0, 40, 2))?.to_xml_string(DOCUMENT_ROOT);

    let no_size = text.replace("<size>2 3 123</size>", "");
    assert!(matches!(
        BitGridMask::from_xml_str(&no_size),
        Err(Error::MalformedDocument(DocumentError::MissingElement("size")))
    ));

    let short = text.replace("<size>2 3 123</size>", "<size>2 3</size>");
    assert!(matches!(
        BitGridMask::from_xml_str(&short),
        Err(Error::MalformedDocument(DocumentError::InvalidIntegers { expected: 3, .. }))
    ));

    let negative = text.replace("<size>2 3 123</size>", "<size>-2 3 123</size>");
    assert!(matches!(
        BitGridMask::from_xml_str(&negative),
        Err(Error::MalformedDocument(DocumentError::OutOfRange { value: -2, .. }))
    ));

    let no_outside = text.replace("outside=\"false\"", "");
    assert!(matches!(
        BitGridMask::from_xml_str(&no_outside),
        Err(Error::MalformedDocument(DocumentError::MissingAttribute("outside")))
    ));

    let mut unknown = single_word("3 0 3 0", "AAAAEA==");
    unknown.set_attribute("ecc", "md5:0000");
    assert!(matches!(
        BitGridMask::from_xml(&unknown),
        Err(Error::MalformedDocument(DocumentError::InvalidChecksum(_)))
    ));

    let garbage = single_word("3 0 3 0", "not base64!");
    assert!(matches!(
        BitGridMask::from_xml(&garbage),
        Err(Error::MalformedDocument(DocumentError::InvalidPayload(_)))
    ));

    assert!(matches!(
        BitGridMask::from_xml_str("<bitmask outside='false'>"),
        Err(Error::Parse(_))
    ));
    Ok(())
}

#[test]
fn hand_written_documents() -> anyhow::Result<()> {
    // no checksum: the payload is taken as is
    let mask = BitGridMask::from_xml(&single_word("3 0 3 0", "AAAAEA=="))?;
    assert!(mask.get_pixel(3, 0));
    assert_eq!(mask.count(), 1);

    // bits outside the bounding box read as the outside value
    let mask = BitGridMask::from_xml(&single_word("0 0 0 0", "AAAAEA=="))?;
    assert_eq!(mask.count(), 0);
    assert_eq!(mask.get_pixels(0, 0), 0);
    check_storage(&mask);

    let mut lenient = single_word("0 0 0 0", "AAAAAA==");
    for value in ["1", "t", "true"] {
        lenient.set_attribute("outside", value);
        assert!(BitGridMask::from_xml(&lenient)?.is_outside_selected());
    }
    lenient.set_attribute("outside", "yes");
    assert!(!BitGridMask::from_xml(&lenient)?.is_outside_selected());
    Ok(())
}

#[test]
fn file_round_trip() -> anyhow::Result<()> {
    let mut rng = rng();
    let mask = random_mask(&mut rng, Rect::new(-500, -500, 500, 500));
    let tmp = Temp::new_file()?;
    mask.clone().into_file(&tmp)?;
    let restored = BitGridMask::from_file(&tmp)?;
    assert_eq!(restored, mask);

    assert!(BitGridMask::from_file("does/not/exist.xml").is_err());
    Ok(())
}
