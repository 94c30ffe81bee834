use serde_json::{Value, json};

pub fn text(text: &str) -> Value {
    json!({ "type": "Text", "text": text })
}

pub fn verse(number: &str, contents: Vec<Value>) -> Value {
    json!({ "type": "Verse", "number": number, "contents": contents })
}

pub fn chapter(number: i32, contents: Vec<Value>) -> Value {
    json!({ "type": "Chapter", "number": number, "contents": contents })
}

pub fn book_id(code: &str) -> Value {
    json!({ "type": "BookId", "code": code })
}

pub fn header(title: &str) -> Value {
    json!({ "type": "Header", "title": title })
}

pub fn chapter_label(label: &str) -> Value {
    json!({ "type": "ChapterLabel", "label": label })
}

pub fn footnote(caller: &str, note: &str) -> Value {
    json!({
        "type": "Footnote",
        "caller": caller,
        "contents": [
            { "type": "FootnoteText", "contents": [text(note)] },
            { "type": "FootnoteEnd" }
        ]
    })
}

pub fn cross_ref(caller: &str, origin: &str, target: &str) -> Value {
    json!({
        "type": "CrossRef",
        "caller": caller,
        "contents": [
            { "type": "CrossRefOrigin", "reference": origin },
            { "type": "CrossRefText", "contents": [text(target)] },
            { "type": "CrossRefEnd" }
        ]
    })
}

pub fn document(contents: Vec<Value>) -> Value {
    json!({ "type": "Document", "contents": contents })
}

/// A book with an id, a running header, a short title and `chapters`
/// chapters of `verses` verses each.
pub fn book(code: &str, title: &str, chapters: i32, verses: i32) -> Vec<Value> {
    let mut markers = vec![
        book_id(code),
        header(title),
        json!({ "type": "ShortTocTitle", "title": title }),
        json!({ "type": "MajorTitle", "title": title, "weight": 1 }),
    ];
    for c in 1..=chapters {
        let contents = (1..=verses)
            .map(|v| verse(&v.to_string(), vec![text(&format!("{title} {c}:{v} "))]))
            .collect();
        markers.push(chapter(c, contents));
    }
    markers
}
