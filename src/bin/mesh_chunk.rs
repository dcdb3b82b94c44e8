//! Chunk meshing demo - meshes a procedural volume and reports per-material stats.
//!
//! Usage: cargo run --release --bin mesh_chunk -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Generator config JSON (default: built-in cube + plant rules)
//!   --size <N>        Volume edge length in voxels (default: 128)
//!   --chunk <N>       Chunk edge length in voxels (default: 32)
//!   --save <PATH>     Write the effective config to PATH and exit

use std::collections::BTreeMap;
use std::time::Instant;

use glam::{IVec3, UVec3};

use apoapsis::condition::BitCondition;
use apoapsis::core::logging;
use apoapsis::meshing::{BlockMeshConfig, BlockTemplate, GeneratorConfig, MeshChunkGenerator, OpeningState};
use apoapsis::voxel::{ChunkRegion, DenseVolume, Voxel};

const STONE: u8 = 1;
const GLASS: u8 = 2;
const PLANT: u8 = 3;

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let size = parse_u32_arg(&args, "--size").unwrap_or(128).max(1);
    let chunk_size = parse_u32_arg(&args, "--chunk").unwrap_or(32).max(1);

    let config = match parse_str_arg(&args, "--config") {
        Some(path) => match GeneratorConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => default_config(),
    };

    if let Some(path) = parse_str_arg(&args, "--save") {
        if let Err(e) = config.save(&path) {
            log::error!("Failed to save config {}: {}", path, e);
            std::process::exit(1);
        }
        log::info!("Config written to {}", path);
        return;
    }

    let generator = match MeshChunkGenerator::from_config(config) {
        Ok(generator) => generator,
        Err(e) => {
            log::error!("Invalid generator config: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Registered {} voxel meshes", generator.voxel_mesh_count());

    let start = Instant::now();
    let volume = build_volume(size);
    log::info!("Built {}^3 volume in {:.1}ms", size, start.elapsed().as_secs_f64() * 1000.0);

    let per_axis = size.div_ceil(chunk_size) as i32;
    let regions: Vec<_> = (0..per_axis)
        .flat_map(|z| (0..per_axis).flat_map(move |y| (0..per_axis).map(move |x| IVec3::new(x, y, z))))
        .map(|coord| ChunkRegion::cube(coord, chunk_size))
        .collect();

    let start = Instant::now();
    let results = generator.generate_chunks(&volume, &regions);
    let elapsed = start.elapsed();

    let mut vertices: BTreeMap<i32, usize> = BTreeMap::new();
    let mut triangles: BTreeMap<i32, usize> = BTreeMap::new();
    let mut failed = 0;
    let mut empty = 0;
    for result in results {
        match result {
            Ok(chunk) => {
                if chunk.bounds().is_none() {
                    empty += 1;
                }
                for material in chunk.materials() {
                    *vertices.entry(material.material_id).or_default() += material.mesh.vertex_count();
                    *triangles.entry(material.material_id).or_default() += material.mesh.triangle_count();
                }
            }
            Err(e) => {
                log::error!("Chunk failed: {}", e);
                failed += 1;
            }
        }
    }

    log::info!(
        "Meshed {} chunks of {}^3 in {:.1}ms ({} without geometry, {} failed)",
        regions.len(), chunk_size, elapsed.as_secs_f64() * 1000.0, empty, failed
    );
    for (material_id, count) in &vertices {
        log::info!(
            "  material {}: {} vertices, {} triangles",
            material_id, count, triangles.get(material_id).copied().unwrap_or(0)
        );
    }
}

fn default_config() -> GeneratorConfig {
    let block = |value: u8, opening_state, template| BlockMeshConfig {
        material_id: value as i32,
        opening_state,
        conditions: vec![BitCondition::byte(0, value)],
        template,
    };
    GeneratorConfig {
        block_meshes: vec![
            block(STONE, OpeningState::Closed, BlockTemplate::Cube),
            block(GLASS, OpeningState::Transparent, BlockTemplate::Cube),
            block(PLANT, OpeningState::Open, BlockTemplate::Cross),
        ],
        ..Default::default()
    }
}

/// Stone hills with a glass pillar and plants scattered on top.
fn build_volume(size: u32) -> DenseVolume {
    let mut volume = DenseVolume::new(size, size, size);
    let mid = size as f32 * 0.4;
    let amplitude = size as f32 * 0.1;
    let height = |x: i32, z: i32| {
        (mid + (x as f32 * 0.11).sin() * amplitude + (z as f32 * 0.07).cos() * amplitude).max(1.0) as u32
    };
    volume.fill_columns(&height, Voxel::with_first_byte(STONE));

    let center = (size / 2) as i32;
    volume.fill_region(
        IVec3::new(center - 2, 0, center - 2),
        UVec3::new(4, size, 4),
        Voxel::with_first_byte(GLASS),
    );

    for z in 0..size as i32 {
        for x in 0..size as i32 {
            if (x * 7 + z * 13) % 11 == 0 {
                volume.write(x, height(x, z) as i32, z, Voxel::with_first_byte(PLANT));
            }
        }
    }
    volume
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
