use hufftree::{CodeTable, Decoder, FrequencyTable, Tree};

fn main() {
    let input = (0..10000u32)
        .map(|i| (i * i % 251 ^ i % 7) as u8)
        .collect::<Vec<_>>();

    for _ in 0..1000 {
        let tree = Tree::from_frequencies(&FrequencyTable::of(&input)).unwrap();
        let bits = CodeTable::from_tree(&tree).unwrap().encode(&input).unwrap();

        let shipped = hufftree::serialize(&tree).unwrap();
        let received = hufftree::deserialize(&shipped).unwrap();
        let decoded = Decoder::new(&received).decode(&bits).unwrap();
        assert_eq!(decoded.len(), input.len());
    }
}
