mod accel;
mod scenes;
mod shapes;
