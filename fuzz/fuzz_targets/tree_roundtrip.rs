#![no_main]
use hufftree::{CodeTable, Decoder, Deserializer, FrequencyTable, TrailingPolicy, Tree};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a serialized tree: must fail cleanly or re-serialize identically.
    if let Ok((tree, used)) = Deserializer::new()
        .trailing(TrailingPolicy::Ignore)
        .deserialize_prefix(data)
    {
        assert_eq!(hufftree::serialize(&tree).unwrap(), &data[..used]);
    }

    if data.is_empty() {
        return;
    }

    // The same bytes as a message: build, ship the tree, decode.
    let tree = Tree::from_frequencies(&FrequencyTable::of(data)).unwrap();
    let bits = CodeTable::from_tree(&tree).unwrap().encode(data).unwrap();
    let received = hufftree::deserialize(&hufftree::serialize(&tree).unwrap()).unwrap();
    let decoded = Decoder::new(&received).decode(&bits).unwrap();
    assert_eq!(data, &decoded[..]);
});
