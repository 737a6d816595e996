use crate::math::{Point3, Vec3};

// Based on Physically Based Rendering 3rd ed.
// https://www.pbr-book.org/3ed-2018/Texture/Noise

#[rustfmt::skip]
static PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103,
    30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197,
    62, 94, 252, 219, 203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20,
    125, 136, 171, 168, 68, 175, 74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231,
    83, 111, 229, 122, 60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102,
    143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169, 200,
    196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64, 52, 217, 226,
    250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206, 59, 227, 47,
    16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79,
    113, 224, 232, 178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210,
    144, 12, 191, 179, 162, 241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31,
    181, 199, 106, 157, 184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236,
    205, 93, 222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

#[inline]
fn perm(i: i64) -> i64 {
    PERM[i.rem_euclid(256) as usize] as i64
}

fn grad(x: i64, y: i64, z: i64, dx: f64, dy: f64, dz: f64) -> f64 {
    let h = perm(perm(perm(x) + y) + z) & 15;
    let u = if h < 8 || h == 12 || h == 13 { dx } else { dy };
    let v = if h < 4 || h == 12 || h == 13 { dy } else { dz };
    (if h & 1 == 1 { -u } else { u }) + (if h & 2 == 2 { -v } else { v })
}

#[inline]
fn noise_weight(t: f64) -> f64 {
    let t3 = t * t * t;
    let t4 = t3 * t;
    6.0 * t4 * t - 15.0 * t4 + 10.0 * t3
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Evaluates Perlin noise at `p`. The result is zero on integer lattice points
/// and stays roughly within [-1, 1].
pub fn noise(p: &Point3) -> f64 {
    let (ix, iy, iz) = (p.x.floor(), p.y.floor(), p.z.floor());
    let (dx, dy, dz) = (p.x - ix, p.y - iy, p.z - iz);
    let (ix, iy, iz) = (ix as i64, iy as i64, iz as i64);

    let w000 = grad(ix, iy, iz, dx, dy, dz);
    let w100 = grad(ix + 1, iy, iz, dx - 1.0, dy, dz);
    let w010 = grad(ix, iy + 1, iz, dx, dy - 1.0, dz);
    let w110 = grad(ix + 1, iy + 1, iz, dx - 1.0, dy - 1.0, dz);
    let w001 = grad(ix, iy, iz + 1, dx, dy, dz - 1.0);
    let w101 = grad(ix + 1, iy, iz + 1, dx - 1.0, dy, dz - 1.0);
    let w011 = grad(ix, iy + 1, iz + 1, dx, dy - 1.0, dz - 1.0);
    let w111 = grad(ix + 1, iy + 1, iz + 1, dx - 1.0, dy - 1.0, dz - 1.0);

    let (wx, wy, wz) = (noise_weight(dx), noise_weight(dy), noise_weight(dz));
    let x00 = lerp(wx, w000, w100);
    let x10 = lerp(wx, w010, w110);
    let x01 = lerp(wx, w001, w101);
    let x11 = lerp(wx, w011, w111);
    let y0 = lerp(wy, x00, x10);
    let y1 = lerp(wy, x01, x11);
    lerp(wz, y0, y1)
}

/// Returns a noise-driven offset for `p`, one decorrelated noise sample per axis.
pub fn noise_vector(p: &Point3) -> Vec3 {
    Vec3::new(
        noise(p),
        noise(&(p + Vec3::new(0.0, 0.0, 1.7))),
        noise(&(p + Vec3::new(3.1, 0.0, 0.0))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point3;

    #[test]
    fn table_is_a_permutation() {
        let mut sorted = PERM.to_vec();
        sorted.sort_unstable();
        assert!(sorted.iter().enumerate().all(|(i, &v)| v as usize == i));
    }

    #[test]
    fn zero_on_lattice() {
        for p in [point3(0.0, 0.0, 0.0), point3(3.0, -2.0, 7.0), point3(-11.0, 4.0, -1.0)] {
            assert_eq!(noise(&p), 0.0);
        }
    }

    #[test]
    fn bounded_and_deterministic() {
        for i in 0..200 {
            let f = i as f64 * 0.173;
            let p = point3(f, f * 0.5 - 3.0, 7.0 - f * 1.3);
            let n = noise(&p);
            assert!(n.abs() <= 1.5, "noise({:?}) = {}", p, n);
            assert_eq!(n, noise(&p));
        }
    }

    #[test]
    fn varies_between_lattice_points() {
        let samples: Vec<f64> = (0..10)
            .map(|i| noise(&point3(0.5 + i as f64, 0.25, 0.75)))
            .collect();
        assert!(samples.iter().any(|&n| n != samples[0]));
    }
}
