use clap::{App, Arg};
use pbr::ProgressBar;
use prt::rng::*;
use prt::threadpool::*;
use prt::tracescene;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::{thread, time};

fn main() {
    env_logger::init();

    let arg_matches = App::new("prt")
        .version("0.1.0")
        .about("Path tracing renderer")
        .arg(
            Arg::new("resolution")
                .long("resolution")
                .short('r')
                .takes_value(true)
                .default_value("1200x800")
                .about("output resolution in pixels"),
        )
        .arg(
            Arg::new("samples")
                .long("samples")
                .short('s')
                .takes_value(true)
                .default_value("10")
                .about("samples per pixel"),
        )
        .arg(
            Arg::new("depth")
                .long("depth")
                .short('d')
                .takes_value(true)
                .default_value("50")
                .about("maximum path length in bounces"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .short('e')
                .takes_value(true)
                .default_value("0")
                .about("rng seed"),
        )
        .arg(
            Arg::new("random")
                .long("random")
                .short('m')
                .about("use a random rng seed"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('t')
                .takes_value(true)
                .default_value("0")
                .about("worker thread count, 0 for one per logical cpu"),
        )
        .arg(
            Arg::new("scene")
                .long("scene")
                .short('c')
                .takes_value(true)
                .default_value("random")
                .about("scene to render: random, textured or cornell-smoke"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .takes_value(true)
                .default_value("o.png")
                .about("output image path"),
        )
        .get_matches();
    let (w, h) = match parse_resolution(arg_matches.value_of("resolution")) {
        Some(v) => v,
        None => {
            eprintln!("invalid resolution");
            return;
        }
    };
    let spp: usize = match parse_arg(arg_matches.value_of("samples")) {
        Some(v) => v,
        None => {
            eprintln!("invalid sample count");
            return;
        }
    };
    let depth: u32 = match parse_arg(arg_matches.value_of("depth")) {
        Some(v) => v,
        None => {
            eprintln!("invalid bounce depth");
            return;
        }
    };
    let threads: usize = match parse_arg(arg_matches.value_of("threads")) {
        Some(v) => v,
        None => {
            eprintln!("invalid thread count");
            return;
        }
    };
    let mut rng: PrtRng = if arg_matches.is_present("random") {
        PrtRng::from_entropy()
    } else {
        match parse_arg(arg_matches.value_of("seed")) {
            Some(v) => PrtRng::seed_from_u64(v),
            None => {
                eprintln!("invalid rng seed");
                return;
            }
        }
    };

    log::info!(
        "rendering {} x {} image, {} samples per pixel, depth {}",
        w,
        h,
        spp,
        depth
    );

    let builder = match arg_matches.value_of("scene") {
        Some("random") => prt::scenes::random_scene,
        Some("textured") => prt::scenes::textured_spheres,
        Some("cornell-smoke") => prt::scenes::cornell_smoke,
        other => {
            eprintln!("unknown scene {:?}", other.unwrap_or(""));
            return;
        }
    };
    let (scene, camera) = match builder(w, h, &mut rng) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("scene construction failed: {}", e);
            return;
        }
    };

    let pxcount = Arc::new(AtomicUsize::new(0));
    let ui_pxcount = Arc::clone(&pxcount);
    let ui_thread = thread::Builder::new()
        .name("ui".to_string())
        .spawn(move || {
            let t = w * h;
            let mut pb = ProgressBar::new((t) as u64);
            loop {
                let x = ui_pxcount.load(Ordering::Relaxed);
                pb.set(x as u64);
                thread::sleep(time::Duration::from_secs(1));
                if x >= t {
                    break;
                }
            }
        })
        .unwrap();

    let pool = init_pool_with_rng(rng, threads);
    let pixels = tracescene(w, h, spp, depth, &scene, &camera, &pool, &pxcount);
    ui_thread.join().unwrap();
    let output = arg_matches.value_of("output").unwrap_or("o.png");
    if let Err(e) = image::save_buffer(output, &pixels[..], w as u32, h as u32, image::ColorType::Rgb8)
    {
        eprintln!("failed to write {}: {}", output, e);
    }
}

fn parse_resolution(s: Option<&str>) -> Option<(usize, usize)> {
    let v: Vec<&str> = s?.split('x').collect();
    if v.len() != 2 {
        return None;
    }
    let w = match v[0].parse::<usize>() {
        Ok(n) => n,
        Err(_) => {
            return None;
        }
    };
    let h = match v[1].parse::<usize>() {
        Ok(n) => n,
        Err(_) => {
            return None;
        }
    };
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}

fn parse_arg<T: std::str::FromStr>(s: Option<&str>) -> Option<T> {
    match s?.parse::<T>() {
        Ok(n) => Some(n),
        Err(_) => None,
    }
}
