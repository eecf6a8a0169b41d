#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfmerger::order::OrderedPageList;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(mut pages) = OrderedPageList::from_json(json) else {
        return;
    };

    // Accepted orders never hold page 0 and survive a round trip.
    assert!(pages.iter().all(|page| page.page_number() >= 1));
    let rendered = pages.to_json().unwrap();
    assert_eq!(OrderedPageList::from_json(&rendered).unwrap(), pages);

    // Moves keep every page.
    let len = pages.len();
    if len > 1 {
        let first = pages.get(0).cloned().unwrap();
        pages.move_page(&first, len - 1);
        assert_eq!(pages.len(), len);
    }
});
