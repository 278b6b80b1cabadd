//! Basic usage example for fixbin
//!
//! Run with: cargo run --example basic_usage

use fixbin::*;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, PartialEq)]
struct Quote {
    seq: u32,
    timestamp_ns: u64,
    bid: i64,
    ask: i64,
    venue: String,
}

impl Encode for Quote {
    fn encode(&self, writer: &mut Writer) -> Result<()> {
        writer.write_u32(self.seq)?;
        writer.write_u64(self.timestamp_ns)?;
        writer.write_i64(self.bid)?;
        writer.write_i64(self.ask)?;
        writer.write_fixed_str(&self.venue, 4)
    }
}

impl Decode for Quote {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Quote {
            seq: reader.read_u32()?,
            timestamp_ns: reader.read_u64()?,
            bid: reader.read_i64()?,
            ask: reader.read_i64()?,
            venue: reader.read_fixed_str_clean(4)?.to_string(),
        })
    }
}

fn main() -> Result<()> {
    println!("fixbin Basic Usage Example");
    println!("==========================");

    // Example 1: primitives and strings written by hand
    println!("\n1. Hand-written Message:");
    {
        let mut writer = Writer::new();
        writer.write_u32(12345)?; // sequence number
        writer.write_u64(1_700_000_000_000_000_000)?; // timestamp (ns since epoch)
        writer.write_i64(-25_500_000)?; // price (6-decimal fixed point)
        writer.write_option(Some("AAPL"), |w, s| w.write_str(s))?;
        writer.write_option(None::<&str>, |w, s| w.write_str(s))?;

        println!("  Encoded {} bytes", writer.len());

        let mut reader = Reader::new(writer.as_bytes());
        let seq = reader.read_u32()?;
        let ts_ns = reader.read_u64()?;
        let price = reader.read_i64()?;
        let symbol = reader.read_option(|r| r.read_str())?;
        let note = reader.read_option(|r| r.read_str())?;
        reader.finish()?;
        println!(
            "  Decoded: seq={}, ts={}, price={}, symbol={:?}, note={:?}",
            seq, ts_ns, price, symbol, note
        );
    }

    // Example 2: a struct with Encode/Decode and fixed-width fields
    println!("\n2. Struct with Fixed-width Venue:");
    {
        let quote = Quote {
            seq: 7,
            timestamp_ns: 1_700_000_001_000_000_000,
            bid: 49_990_000,
            ask: 50_010_000,
            venue: "NASDAQ".to_string(), // truncated to 4 bytes
        };

        let bytes = to_vec(&quote)?;
        println!("  Encoded {} bytes", bytes.len());

        let decoded: Quote = from_bytes_exact(&bytes)?;
        println!("  Decoded: {:?}", decoded);
    }

    // Example 3: containers and nested length-prefixed values
    println!("\n3. Containers and Nesting:");
    {
        let mut levels = BTreeMap::new();
        levels.insert(1u16, 50_000_000i64);
        levels.insert(2u16, 50_010_000i64);

        let mut writer = Writer::new();
        writer.encode(&levels)?;
        writer.encode_length_prefixed(&vec!["maker".to_string(), "taker".to_string()])?;
        writer.write_duration(Duration::from_millis(1500))?;
        writer.write_array(&[0xCAu8, 0xFE], |w, b| w.write_u8(*b))?;

        println!("  Encoded {} bytes", writer.len());

        let mut reader = Reader::with_config(writer.as_bytes(), Config::new().strict_nested());
        let levels: BTreeMap<u16, i64> = reader.decode()?;
        let tags: Vec<String> = reader.decode_length_prefixed()?;
        let ttl = reader.read_duration()?;
        let magic: [u8; 2] = reader.read_array(|r| r.read_u8())?;
        reader.finish()?;
        println!(
            "  Decoded: levels={:?}, tags={:?}, ttl={:?}, magic={:02X?}",
            levels, tags, ttl, magic
        );
    }

    // Example 4: backpatching a header once the body size is known
    println!("\n4. Backpatched Header:");
    {
        let mut writer = Writer::with_capacity(16);
        let len_at = writer.reserve(4)?;
        writer.write_str("payload of unknown size")?;
        let body_len = writer.len() - 4;
        writer.patch_u32(len_at, body_len as u32)?;

        let mut reader = Reader::new(writer.as_bytes());
        let declared = reader.read_u32()? as usize;
        let body = reader.read_sized(declared, |r| r.read_str())?;
        println!("  Header says {} bytes, body={:?}", declared, body);
    }

    // Example 5: flags and pooled writers
    println!("\n5. Flags and Writer Pool:");
    {
        let mut flags = Flags8::new();
        flags.set(0)?;
        flags.set(3)?;

        let mut pool = WriterPool::default();
        for round in 0..3u8 {
            let mut writer = pool.acquire();
            writer.encode(&flags)?;
            writer.write_u8(round)?;
            println!("  Round {}: {:02X?}", round, writer.as_bytes());
            pool.release(writer);
        }
        println!("  Pooled writers: {}", pool.len());
    }

    // Example 6: errors
    println!("\n6. Error Handling:");
    {
        let truncated = [0x01u8, 0x00, 0x00];
        match from_bytes::<u64>(&truncated) {
            Ok(_) => println!("  Unexpected success"),
            Err(e) => println!("  Truncated input: {}", e),
        }

        match from_bytes::<bool>(&[0x02]) {
            Ok(_) => println!("  Unexpected success"),
            Err(e) => println!("  Bad bool: {}", e),
        }

        let limited = Config::new().with_limit(16);
        let mut reader = Reader::with_config(&[0xFF; 8], limited);
        match reader.read_len() {
            Ok(_) => println!("  Unexpected success"),
            Err(e) => println!("  Oversized prefix: {}", e),
        }
    }

    println!("\nAll examples completed successfully!");
    Ok(())
}
