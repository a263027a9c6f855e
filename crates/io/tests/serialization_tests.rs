//!

use neo_io::{helper, BinaryWriter, MemoryReader, Result, Serializable};

#[cfg(test)]
mod serialization_tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Serializable for Point {
        fn size(&self) -> usize {
            8
        }

        fn serialize(&self, writer: &mut BinaryWriter) -> Result<()> {
            writer.write_i32(self.x)?;
            writer.write_i32(self.y)?;
            Ok(())
        }

        fn deserialize(reader: &mut MemoryReader) -> Result<Self> {
            let x = reader.read_int32()?;
            let y = reader.read_int32()?;
            Ok(Point { x, y })
        }
    }

    #[test]
    fn test_roundtrips_through_serialize_to_array_and_deserialize() {
        let point = Point { x: -5, y: 42 };

        let mut writer = BinaryWriter::new();
        point.serialize(&mut writer).unwrap();
        let bytes = writer.to_bytes();
        assert_eq!(bytes.len(), point.size());

        let mut reader = MemoryReader::new(&bytes);
        let decoded = Point::deserialize(&mut reader).unwrap();
        assert_eq!(decoded, point);
    }

    #[test]
    fn test_serialize_array_writes_count_prefix_and_items() {
        let points = vec![
            Point { x: 1, y: 2 },
            Point { x: 3, y: 4 },
            Point { x: 5, y: 6 },
        ];

        let mut writer = BinaryWriter::new();
        helper::serialize_array(&points, &mut writer).unwrap();
        let bytes = writer.to_bytes();

        // one-byte var_int count prefix + 8 bytes per point
        assert_eq!(bytes.len(), 1 + points.len() * 8);

        let mut reader = MemoryReader::new(&bytes);
        let decoded: Vec<Point> = helper::deserialize_array(&mut reader, 16).unwrap();
        assert_eq!(decoded, points);
    }

    #[test]
    fn test_deserialize_array_rejects_counts_above_max() {
        // A var_int count of 100 with a max of 16 must fail before reading any items.
        let mut writer = BinaryWriter::new();
        writer.write_var_int(100).unwrap();
        let bytes = writer.to_bytes();

        let mut reader = MemoryReader::new(&bytes);
        let result: Result<Vec<Point>> = helper::deserialize_array(&mut reader, 16);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_var_size_matches_protocol_thresholds() {
        assert_eq!(helper::get_var_size(0), 1);
        assert_eq!(helper::get_var_size(0xFC), 1);
        assert_eq!(helper::get_var_size(0xFD), 3);
        assert_eq!(helper::get_var_size(0xFFFF), 3);
        assert_eq!(helper::get_var_size(0x1_0000), 5);
        assert_eq!(helper::get_var_size(0xFFFF_FFFF), 5);
        assert_eq!(helper::get_var_size(0x1_0000_0000), 9);
    }

    #[test]
    fn test_get_array_size_accounts_for_count_prefix_and_items() {
        let points = vec![Point { x: 0, y: 0 }; 10];
        assert_eq!(helper::get_array_size(&points), 1 + 10 * 8);
    }
}
